//! Synthetic heatmap overlays
//!
//! Six metrics (volume, frequency, occupancy, misplacement, expiry,
//! exceptions), each a deterministic function of the layout, the metric and
//! the requested time range.

pub mod colors;
pub mod generator;

// Re-export all public types for convenience
pub use colors::{ColorRamp, Hsl};
pub use generator::{
    generate_heatmap_data, heatmap_seed, HeatmapGenerator, HeatmapLayer, HeatmapSample,
    MAX_HEATMAP_SAMPLES, MIN_HEATMAP_VALUE,
};
