//! Simulation runtime and control
//!
//! This module contains the seeded random stream, clocks, per-kind movement
//! profiles, the live resource simulator with its host loops, statistics,
//! error handling and logging setup.
//!
//! # Overview
//!
//! - **SeededRandom**: Reproducible linear congruential stream for trails and heatmaps
//! - **Clock**: Injectable time source, system or manual
//! - **MovementProfile**: Per-kind movement parameters looked up from a table
//! - **ResourceSimulator**: Owns the live roster and advances it one tick at a time
//! - **FrameLoop**: Drives the simulator at a fixed frame interval
//! - **WarehouseError**: Error taxonomy shared across the crate
//!
//! # Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use warehouse_twin::layout::build_layout;
//! use warehouse_twin::simulation::*;
//! use warehouse_twin::types::{LayoutConfig, SimulatorConfig};
//!
//! let layout = Arc::new(build_layout(&LayoutConfig::default()));
//! let mut simulator = ResourceSimulator::new(layout, SimulatorConfig::default(), Some(42));
//!
//! let clock = ManualClock::new(0);
//! let report = FrameLoop::default().run_simulated(&mut simulator, &clock, 6_000);
//! assert!(report.notifications >= 2);
//!
//! let mut random = SeededRandom::new(42);
//! assert!((0.0..1.0).contains(&random.next()));
//! ```

pub mod clock;
pub mod error;
pub mod frame_loop;
pub mod logging;
pub mod profiles;
pub mod resource;
pub mod seeded_random;
pub mod simulator;
pub mod statistics;

// Re-export all public types for convenience
pub use clock::*;
pub use error::*;
pub use frame_loop::*;
pub use logging::*;
pub use profiles::*;
pub use resource::*;
pub use seeded_random::*;
pub use simulator::*;
pub use statistics::*;
