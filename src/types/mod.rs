//! Core types and data structures
//!
//! This module contains the identifier types, enumerations and configuration
//! structures shared by the layout, heatmap, trail and simulation modules.
//!
//! # Module Organization
//!
//! - [`identifiers`]: Cell, resource and listener identifiers
//! - [`enums`]: Heatmap metrics, resource kinds, statuses and trail actions
//! - [`config`]: Layout/simulator/trail configuration, config files and CLI arguments

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::{
    CliArgs, ConfigError, ConfigFile, ConfigValidationError, LayoutConfig, SimulationConfig,
    SimulatorConfig, TrailConfig, MAX_SIMULATE_SECONDS,
};
pub use enums::{
    Direction, DockStatus, HeatmapMetric, ResourceKind, ResourceStatus, TrailAction, ZoneKind,
};
pub use identifiers::{CellId, CellIdParts, ListenerId, ResourceId};
