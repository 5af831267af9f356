//! Warehouse Twin
//!
//! A synthetic warehouse floor: storage-cell geometry derived from a handful of
//! layout parameters, seeded heatmap overlays, deterministic movement trails for
//! simulated equipment and a live, tick-driven resource simulator.
//!
//! # Overview
//!
//! Nothing here reads real warehouse data. Positions, trails and intensities are
//! generated procedurally; the seeded parts are reproducible so that repeating a
//! query yields the same picture.
//!
//! ## Key Features
//!
//! - **Layout Derivation**: Cells, dock doors, staging areas and named zones from one config
//! - **Heatmaps**: Six synthetic metrics, truncated to the 200 strongest cells
//! - **Movement Trails**: Time-ordered, cached waypoint histories per resource and range
//! - **Live Simulation**: Jittered wake times, a mover cap and throttled listener updates
//! - **Boundary Payloads**: Health, layout echo and the jittered position feed
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use warehouse_twin::*;
//!
//! let layout = Arc::new(build_layout(&LayoutConfig::default()));
//!
//! let heatmap = HeatmapGenerator::new(Arc::clone(&layout));
//! let samples = heatmap.generate(HeatmapMetric::Volume, 120);
//! assert!(samples.len() <= MAX_HEATMAP_SAMPLES);
//!
//! let trails = MovementTrailGenerator::new(Arc::clone(&layout), Arc::new(SystemClock));
//! let trail = trails.get_trail("FL-001", 60);
//! assert!(trail.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`layout`]: Floor geometry and lookups
//! - [`heatmap`]: Synthetic intensity overlays and colour ramps
//! - [`trails`]: Movement trails, their cache and activity timelines
//! - [`simulation`]: Seeded randomness, clocks, the live simulator, errors and logging
//! - [`wire`]: JSON payloads at the dashboard boundary
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Layout    │    │   Heatmap   │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Cells       │◄───┤ Metrics     │
//! │ Enums       │    │ Docks       │    │ Ramps       │
//! │ Config      │    │ Zones       │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                           ▲
//!                           │
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │    Wire     │    │   Trails    │    │ Simulation  │
//! │             │    │             │    │             │
//! │ Health      │    │ Generator   │◄───┤ Random      │
//! │ Positions   │    │ Cache       │    │ Clock       │
//! │             │    │ Timeline    │    │ Simulator   │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod heatmap;
pub mod layout;
pub mod simulation;
pub mod trails;
pub mod types;
pub mod wire;

// Core types and configuration
pub use types::{
    CellId, ConfigValidationError, HeatmapMetric, LayoutConfig, ResourceId, ResourceKind,
    ResourceStatus, SimulationConfig, SimulatorConfig, TrailAction,
};

// Layout
pub use layout::{
    build_layout, Cell, DockDoor, StagingArea, WarehouseLayout, WarehouseLayoutBuilder,
};

// Heatmaps
pub use heatmap::{HeatmapGenerator, HeatmapSample, MAX_HEATMAP_SAMPLES};

// Trails
pub use trails::{MovementTrail, MovementTrailGenerator, TrailPoint};

// Simulation
pub use simulation::{
    Clock, ManualClock, ResourceSimulator, SeededRandom, SimulatedResource, SystemClock,
    WarehouseError, WarehouseResult,
};
