//! Movement trails
//!
//! Time-bounded, deterministic waypoint histories for simulated equipment,
//! their per-query cache and the activity timeline drawn beneath the map.
//!
//! # Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use warehouse_twin::layout::build_layout;
//! use warehouse_twin::simulation::ManualClock;
//! use warehouse_twin::trails::MovementTrailGenerator;
//! use warehouse_twin::types::LayoutConfig;
//!
//! let layout = Arc::new(build_layout(&LayoutConfig::default()));
//! let clock = Arc::new(ManualClock::new(1_700_000_000_000));
//! let generator = MovementTrailGenerator::new(layout, clock);
//!
//! let first = generator.get_trail("FL-001", 60);
//! let again = generator.get_trail("FL-001", 60);
//! assert_eq!(first, again);
//! ```

mod cache;
pub mod generator;
pub mod point;
pub mod timeline;

// Re-export all public types for convenience
pub use generator::{generate_trail, trail_seed, ActivityWindow, MovementTrailGenerator};
pub use point::{MovementTrail, TrailPoint};
pub use timeline::{
    build_timeline, time_labels, ActivityTimeline, SegmentState, TimeLabel, TimelineSegment,
    LABEL_INTERVALS, MIN_SEGMENT_WIDTH_PERCENT,
};
