//! Warehouse floor geometry
//!
//! Derives every storage cell, dock door, staging area and named zone from a
//! [`LayoutConfig`](crate::types::LayoutConfig). The result is immutable; a
//! configuration change rebuilds the whole layout.
//!
//! # Usage Example
//!
//! ```rust
//! use warehouse_twin::layout::WarehouseLayoutBuilder;
//!
//! let layout = WarehouseLayoutBuilder::new()
//!     .aisles(["A1", "A2"])
//!     .bins_per_aisle(2)
//!     .levels(1)
//!     .depth(1)
//!     .dock_doors(0)
//!     .build();
//!
//! assert_eq!(layout.cells.len(), 4);
//! assert!(layout.find_cell("A2-B02-L1-D1").is_some());
//! ```

pub mod builder;
pub mod cell;
pub mod geometry;
pub mod search;
pub mod zones;

// Re-export all public types for convenience
pub use builder::{build_layout, LayoutStats, WarehouseLayout, WarehouseLayoutBuilder};
pub use cell::{Cell, DockDoor, StagingArea};
pub use geometry::{Point, Rect};
pub use search::MAX_SKU_RESULTS;
pub use zones::Zone;
