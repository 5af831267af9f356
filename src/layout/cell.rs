//! Storage cells, dock doors and staging areas

use crate::layout::geometry::{Point, Rect};
use crate::types::{CellId, DockStatus};
use serde::Serialize;

/// A single storage slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// `{aisle}-B{bin:02}-L{level}-D{depth}`
    pub cell_id: CellId,
    /// Render-space rectangle
    #[serde(flatten)]
    pub rect: Rect,
    /// Aisle label
    pub aisle: String,
    /// Position of the aisle in the configured label order
    pub aisle_index: usize,
    /// Bin along the aisle (1-based)
    pub bin: u32,
    /// Vertical level (1-based)
    pub level: u32,
    /// Rack depth (1-based)
    pub depth: u32,
}

impl Cell {
    /// Centre of the cell
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// A loading door along the bottom edge of the floor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DockDoor {
    /// `DOCK-01`, `DOCK-02`, ...
    pub id: String,
    /// Render-space rectangle
    #[serde(flatten)]
    pub rect: Rect,
    /// Decorative door state
    pub status: DockStatus,
}

impl DockDoor {
    /// Whether a trailer is at the door
    pub fn is_occupied(&self) -> bool {
        self.status == DockStatus::Occupied
    }
}

/// Holding area between the racks and its dock door
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingArea {
    /// `STG-01`, `STG-02`, ...
    pub id: String,
    /// Dock door this area serves
    pub dock_id: String,
    /// Render-space rectangle
    #[serde(flatten)]
    pub rect: Rect,
    /// Whether goods are staged here
    pub occupied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_serializes_flat_camel_case() {
        let cell = Cell {
            cell_id: CellId::new("A1", 1, 1, 1),
            rect: Rect::new(40.0, 0.0, 40.0, 30.0),
            aisle: "A1".to_string(),
            aisle_index: 0,
            bin: 1,
            level: 1,
            depth: 1,
        };

        let value = serde_json::to_value(&cell).unwrap();
        assert_eq!(value["cellId"], "A1-B01-L1-D1");
        assert_eq!(value["x"], 40.0);
        assert_eq!(value["height"], 30.0);
        assert_eq!(value["aisleIndex"], 0);
    }

    #[test]
    fn test_staging_area_references_dock() {
        let staging = StagingArea {
            id: "STG-01".to_string(),
            dock_id: "DOCK-01".to_string(),
            rect: Rect::new(0.0, 0.0, 80.0, 40.0),
            occupied: false,
        };
        let value = serde_json::to_value(&staging).unwrap();
        assert_eq!(value["dockId"], "DOCK-01");
        assert_eq!(value["occupied"], false);
    }
}
