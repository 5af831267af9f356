//! Layout derivation
//!
//! Aisles are vertical bands laid out left to right. Each band is a rack on
//! either side of a travel aisle: odd depths sit left of the aisle, even depths
//! right, and depths beyond 2 stack further tiers outward. Bins run down the
//! band and levels are stacked below one another. The staging row and the dock
//! doors follow below the racks, separated by `dock_offset`.
//!
//! ```text
//!  off |D1|  aisle  |D2| |D1|  aisle  |D2| off
//!      |  |         |  | |  |         |  |
//!      ---------- cross aisle ------------
//!       [STG-01]    [STG-02]    [STG-03]
//!       [DOCK-01]   [DOCK-02]   [DOCK-03]
//! ```

use crate::layout::cell::{Cell, DockDoor, StagingArea};
use crate::layout::geometry::{Point, Rect};
use crate::layout::zones::{derive_zones, Zone};
use crate::types::{CellId, DockStatus, LayoutConfig, ZoneKind};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Fully derived warehouse geometry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseLayout {
    /// Configuration the layout was built from
    pub config: LayoutConfig,
    /// Storage cells, aisle-major
    pub cells: Vec<Cell>,
    /// Dock doors, left to right
    #[serde(rename = "dockDoorPositions")]
    pub dock_doors: Vec<DockDoor>,
    /// Staging areas, one per dock door
    pub staging_areas: Vec<StagingArea>,
    /// Named zones used as trail destinations
    pub zones: Vec<Zone>,
    /// Floor rectangle enclosing everything above
    pub bounds: Rect,
    #[serde(skip)]
    rack_height: f64,
    #[serde(skip)]
    cell_index: HashMap<String, usize>,
}

/// Summary statistics about a layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutStats {
    /// Storage cells
    pub cell_count: usize,
    /// Aisles
    pub aisle_count: usize,
    /// Dock doors
    pub dock_count: usize,
    /// Staging areas
    pub staging_count: usize,
    /// Dock doors with a trailer at them
    pub occupied_docks: usize,
    /// Staging areas holding goods
    pub occupied_staging: usize,
    /// Area of the floor bounds
    pub floor_area: f64,
    /// Summed area of all cells
    pub storage_area: f64,
}

/// Fluent builder over [`LayoutConfig`]
#[derive(Debug, Clone, Default)]
pub struct WarehouseLayoutBuilder {
    config: LayoutConfig,
}

impl WarehouseLayoutBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Set the aisle labels
    pub fn aisles<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.aisle_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the bins per aisle
    pub fn bins_per_aisle(mut self, bins: u32) -> Self {
        self.config.bins_per_aisle = bins;
        self
    }

    /// Set the stacked levels
    pub fn levels(mut self, levels: u32) -> Self {
        self.config.levels = levels;
        self
    }

    /// Set the rack depth
    pub fn depth(mut self, depth: u32) -> Self {
        self.config.depth = depth;
        self
    }

    /// Set the cell dimensions
    pub fn cell_size(mut self, width: f64, height: f64) -> Self {
        self.config.cell_width = width;
        self.config.cell_height = height;
        self
    }

    /// Set the travel aisle width
    pub fn aisle_width(mut self, width: f64) -> Self {
        self.config.aisle_width = width;
        self
    }

    /// Set the number of dock doors
    pub fn dock_doors(mut self, doors: u32) -> Self {
        self.config.dock_doors = doors;
        self
    }

    /// Set the dock door dimensions
    pub fn dock_size(mut self, width: f64, height: f64) -> Self {
        self.config.dock_width = width;
        self.config.dock_height = height;
        self
    }

    /// Set the staging area dimensions
    pub fn staging_size(mut self, width: f64, height: f64) -> Self {
        self.config.staging_width = width;
        self.config.staging_height = height;
        self
    }

    /// Set the floor margin
    pub fn dock_offset(mut self, offset: f64) -> Self {
        self.config.dock_offset = offset;
        self
    }

    /// Derive the layout
    pub fn build(self) -> WarehouseLayout {
        build_layout(&self.config)
    }
}

/// Derive cells, dock doors, staging areas and zones from a configuration
///
/// Never fails: configurations without storage (no aisles, zero bins, levels or
/// depth, non-positive cell size) give an empty cell list.
#[instrument(skip(config), fields(aisles = config.aisle_labels.len()))]
pub fn build_layout(config: &LayoutConfig) -> WarehouseLayout {
    let _span = crate::perf_span!("build_layout").entered();
    let config = &without_repeated_aisles(config);

    let has_storage = config.has_storage();
    let offset = config.dock_offset.max(0.0);
    let rack_height = if has_storage {
        config.bins_per_aisle as f64 * config.levels as f64 * config.cell_height
    } else {
        0.0
    };
    let floor_width = 2.0 * offset
        + if has_storage { config.aisle_labels.len() as f64 * config.aisle_pitch() } else { 0.0 };

    let cells = if has_storage { layout_cells(config, offset) } else { Vec::new() };
    if !has_storage && !config.aisle_labels.is_empty() {
        warn!(
            bins = config.bins_per_aisle,
            levels = config.levels,
            depth = config.depth,
            "Layout configuration has no storage positions; building an empty cell list"
        );
    }

    let (dock_doors, staging_areas) = layout_docks(config, floor_width, rack_height, offset);

    let height = match dock_doors.first() {
        Some(dock) => dock.rect.bottom(),
        None => rack_height + offset,
    };
    let bounds = Rect::new(0.0, 0.0, floor_width, height);
    let zones = derive_zones(config, &staging_areas, &bounds, rack_height);

    let cell_index =
        cells.iter().enumerate().map(|(i, cell)| (cell.cell_id.as_str().to_string(), i)).collect();

    info!(
        cells = cells.len(),
        docks = dock_doors.len(),
        width = bounds.width,
        height = bounds.height,
        "Warehouse layout built"
    );

    WarehouseLayout {
        config: config.clone(),
        cells,
        dock_doors,
        staging_areas,
        zones,
        bounds,
        rack_height,
        cell_index,
    }
}

/// Keep the first occurrence of each aisle label so cell ids stay unique
fn without_repeated_aisles(config: &LayoutConfig) -> LayoutConfig {
    let mut seen = HashSet::new();
    let mut config = config.clone();
    config.aisle_labels.retain(|label| {
        let first = seen.insert(label.clone());
        if !first {
            warn!(aisle = %label, "Repeated aisle label skipped");
        }
        first
    });
    config
}

fn layout_cells(config: &LayoutConfig, offset: f64) -> Vec<Cell> {
    let rack_width = config.rack_width();
    let pitch = config.aisle_pitch();
    let cw = config.cell_width;
    let ch = config.cell_height;
    let bins = config.bins_per_aisle;

    let mut cells = Vec::with_capacity(config.expected_cell_count());
    for (aisle_index, aisle) in config.aisle_labels.iter().enumerate() {
        let band_x = offset + aisle_index as f64 * pitch;
        for bin in 1..=bins {
            for level in 1..=config.levels {
                let y = (bin - 1) as f64 * ch + (level - 1) as f64 * ch * bins as f64;
                for depth in 1..=config.depth {
                    let tier = ((depth - 1) / 2) as f64;
                    let x = if (depth - 1) % 2 == 0 {
                        band_x + rack_width - (tier + 1.0) * cw
                    } else {
                        band_x + rack_width + config.aisle_width + tier * cw
                    };
                    cells.push(Cell {
                        cell_id: CellId::new(aisle, bin, level, depth),
                        rect: Rect::new(x, y, cw, ch),
                        aisle: aisle.clone(),
                        aisle_index,
                        bin,
                        level,
                        depth,
                    });
                }
            }
        }
    }
    debug!(count = cells.len(), "Laid out storage cells");
    cells
}

fn layout_docks(
    config: &LayoutConfig,
    floor_width: f64,
    rack_height: f64,
    offset: f64,
) -> (Vec<DockDoor>, Vec<StagingArea>) {
    let count = config.dock_doors as usize;
    if count == 0 || floor_width <= 0.0 {
        return (Vec::new(), Vec::new());
    }
    let sizes =
        [config.dock_width, config.dock_height, config.staging_width, config.staging_height];
    if sizes.iter().any(|size| !size.is_finite() || *size <= 0.0) {
        warn!(docks = count, "Dock or staging size is not positive; building no dock doors");
        return (Vec::new(), Vec::new());
    }

    let spacing = floor_width / count as f64;
    let dock_width = config.dock_width.min(spacing);
    let staging_width = config.staging_width.min(spacing);
    let staging_y = rack_height + offset;
    let dock_y = staging_y + config.staging_height + offset;

    let mut docks = Vec::with_capacity(count);
    let mut staging = Vec::with_capacity(count);
    for i in 0..count {
        let slot_x = i as f64 * spacing;
        let dock = DockDoor {
            id: format!("DOCK-{:02}", i + 1),
            rect: Rect::new(
                slot_x + (spacing - dock_width) / 2.0,
                dock_y,
                dock_width,
                config.dock_height,
            ),
            status: DockStatus::for_index(i),
        };
        staging.push(StagingArea {
            id: format!("STG-{:02}", i + 1),
            dock_id: dock.id.clone(),
            rect: Rect::new(
                slot_x + (spacing - staging_width) / 2.0,
                staging_y,
                staging_width,
                config.staging_height,
            ),
            occupied: dock.is_occupied(),
        });
        docks.push(dock);
    }
    (docks, staging)
}

impl WarehouseLayout {
    /// Look up a cell by id
    pub fn find_cell(&self, cell_id: &str) -> Option<&Cell> {
        self.cell_index.get(cell_id).and_then(|&i| self.cells.get(i))
    }

    /// Cell containing a render-space point
    pub fn cell_at(&self, x: f64, y: f64) -> Option<&Cell> {
        let aisle = self.aisle_at_x(x)?;
        self.cells_in_aisle(aisle).iter().find(|cell| cell.rect.contains(x, y))
    }

    /// Index of the aisle band containing `x`
    pub fn aisle_at_x(&self, x: f64) -> Option<usize> {
        if self.cells.is_empty() {
            return None;
        }
        let relative = x - self.config.dock_offset.max(0.0);
        let pitch = self.config.aisle_pitch();
        if relative < 0.0 || pitch <= 0.0 {
            return None;
        }
        let index = (relative / pitch).floor() as usize;
        (index < self.config.aisle_labels.len()).then_some(index)
    }

    /// Horizontal centre of an aisle's travel lane
    pub fn aisle_center_x(&self, index: usize) -> Option<f64> {
        if self.cells.is_empty() || index >= self.config.aisle_labels.len() {
            return None;
        }
        Some(
            self.config.dock_offset.max(0.0)
                + index as f64 * self.config.aisle_pitch()
                + self.config.rack_width()
                + self.config.aisle_width / 2.0,
        )
    }

    /// Cells of one aisle as a contiguous slice
    pub fn cells_in_aisle(&self, index: usize) -> &[Cell] {
        let per_aisle = self.config.cells_per_aisle();
        let start = index.saturating_mul(per_aisle);
        let end = start.saturating_add(per_aisle);
        self.cells.get(start..end).unwrap_or(&[])
    }

    /// Label of an aisle by index
    pub fn aisle_label(&self, index: usize) -> Option<&str> {
        if self.cells.is_empty() {
            return None;
        }
        self.config.aisle_labels.get(index).map(String::as_str)
    }

    /// Number of aisles carrying storage
    pub fn aisle_count(&self) -> usize {
        if self.cells.is_empty() {
            0
        } else {
            self.config.aisle_labels.len()
        }
    }

    /// Total height of the rack area
    pub fn rack_height(&self) -> f64 {
        self.rack_height
    }

    /// Vertical position of the cross aisle between the racks and the staging row
    pub fn cross_aisle_y(&self) -> f64 {
        self.rack_height + self.config.dock_offset.max(0.0) / 2.0
    }

    /// Floor rectangle
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Look up a dock door by id
    pub fn dock_door(&self, id: &str) -> Option<&DockDoor> {
        self.dock_doors.iter().find(|dock| dock.id == id)
    }

    /// Staging area serving a dock door
    pub fn staging_for_dock(&self, dock_id: &str) -> Option<&StagingArea> {
        self.staging_areas.iter().find(|area| area.dock_id == dock_id)
    }

    /// Look up a zone by kind
    pub fn zone(&self, kind: ZoneKind) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.kind == kind)
    }

    /// Position of the zone or staging area with this location id
    pub fn location_position(&self, location_id: &str) -> Option<Point> {
        if let Some(zone) = self.zones.iter().find(|zone| zone.id == location_id) {
            return Some(zone.position);
        }
        if let Some(cell) = self.find_cell(location_id) {
            return Some(cell.center());
        }
        self.staging_areas.iter().find(|area| area.id == location_id).map(|a| a.rect.center())
    }

    /// Summary statistics
    pub fn stats(&self) -> LayoutStats {
        LayoutStats {
            cell_count: self.cells.len(),
            aisle_count: self.aisle_count(),
            dock_count: self.dock_doors.len(),
            staging_count: self.staging_areas.len(),
            occupied_docks: self.dock_doors.iter().filter(|d| d.is_occupied()).count(),
            occupied_staging: self.staging_areas.iter().filter(|s| s.occupied).count(),
            floor_area: self.bounds.area(),
            storage_area: self.cells.iter().map(|c| c.rect.area()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> LayoutConfig {
        LayoutConfig {
            aisle_labels: vec!["A1".into(), "A2".into()],
            bins_per_aisle: 2,
            levels: 1,
            depth: 1,
            dock_doors: 0,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn test_two_aisle_two_bin_layout() {
        let layout = build_layout(&two_by_two());
        let ids: Vec<&str> = layout.cells.iter().map(|c| c.cell_id.as_str()).collect();

        assert_eq!(ids, vec!["A1-B01-L1-D1", "A1-B02-L1-D1", "A2-B01-L1-D1", "A2-B02-L1-D1"]);
        assert!(layout.dock_doors.is_empty());
        assert!(layout.staging_areas.is_empty());
    }

    #[test]
    fn test_cell_coordinates_for_default_depth() {
        let layout = build_layout(&LayoutConfig::default());

        // dock offset 40, pitch 2*40 + 120 = 200
        let d1 = layout.find_cell("A1-B01-L1-D1").unwrap();
        assert_eq!(d1.rect, Rect::new(40.0, 0.0, 40.0, 30.0));

        let d2 = layout.find_cell("A1-B01-L1-D2").unwrap();
        assert_eq!(d2.rect.x, 40.0 + 40.0 + 120.0);

        let second_aisle = layout.find_cell("A2-B03-L1-D1").unwrap();
        assert_eq!(second_aisle.rect.x, 240.0);
        assert_eq!(second_aisle.rect.y, 60.0);

        let level_two = layout.find_cell("A1-B01-L2-D1").unwrap();
        assert_eq!(level_two.rect.y, 30.0 * 20.0);
    }

    #[test]
    fn test_deep_racks_stack_outward() {
        let config = LayoutConfig { depth: 4, ..two_by_two() };
        let layout = build_layout(&config);

        let x = |id: &str| layout.find_cell(id).unwrap().rect.x;
        // rack width 80 per side, band starts at 40
        assert_eq!(x("A1-B01-L1-D1"), 80.0);
        assert_eq!(x("A1-B01-L1-D3"), 40.0);
        assert_eq!(x("A1-B01-L1-D2"), 240.0);
        assert_eq!(x("A1-B01-L1-D4"), 280.0);
    }

    #[test]
    fn test_docks_and_staging_pairs() {
        let layout = build_layout(&LayoutConfig::default());

        assert_eq!(layout.dock_doors.len(), 6);
        assert_eq!(layout.staging_areas.len(), 6);
        assert_eq!(layout.dock_doors[0].id, "DOCK-01");
        assert_eq!(layout.dock_doors[0].status, DockStatus::Open);
        assert_eq!(layout.dock_doors[1].status, DockStatus::Closed);
        assert_eq!(layout.dock_doors[2].status, DockStatus::Occupied);

        for (dock, staging) in layout.dock_doors.iter().zip(&layout.staging_areas) {
            assert_eq!(staging.dock_id, dock.id);
            assert_eq!(staging.occupied, dock.is_occupied());
            assert!(staging.rect.bottom() < dock.rect.y);
            assert!(layout.bounds.contains_rect(&dock.rect));
        }
        assert_eq!(layout.staging_for_dock("DOCK-03").unwrap().id, "STG-03");
        assert!(layout.dock_door("DOCK-99").is_none());
    }

    #[test]
    fn test_aisle_lookup() {
        let layout = build_layout(&LayoutConfig::default());

        assert_eq!(layout.aisle_at_x(10.0), None);
        assert_eq!(layout.aisle_at_x(45.0), Some(0));
        assert_eq!(layout.aisle_at_x(245.0), Some(1));
        assert_eq!(layout.aisle_at_x(5000.0), None);
        assert_eq!(layout.aisle_center_x(0), Some(140.0));
        assert_eq!(layout.aisle_center_x(9), None);
        assert_eq!(layout.cells_in_aisle(1).len(), 80);
        assert!(layout.cells_in_aisle(1).iter().all(|c| c.aisle == "A2"));
        assert!(layout.cells_in_aisle(7).is_empty());
    }

    #[test]
    fn test_cell_at_point() {
        let layout = build_layout(&LayoutConfig::default());

        let cell = layout.cell_at(41.0, 31.0).unwrap();
        assert_eq!(cell.cell_id.as_str(), "A1-B02-L1-D1");
        // Inside the travel aisle
        assert!(layout.cell_at(140.0, 31.0).is_none());
    }

    #[test]
    fn test_empty_geometry() {
        for config in [
            LayoutConfig { bins_per_aisle: 0, ..LayoutConfig::default() },
            LayoutConfig { levels: 0, ..LayoutConfig::default() },
            LayoutConfig { depth: 0, ..LayoutConfig::default() },
            LayoutConfig { cell_width: 0.0, ..LayoutConfig::default() },
            LayoutConfig { aisle_labels: Vec::new(), ..LayoutConfig::default() },
        ] {
            let layout = build_layout(&config);
            assert!(layout.cells.is_empty());
            assert_eq!(layout.aisle_count(), 0);
            assert_eq!(layout.rack_height(), 0.0);
            assert_eq!(layout.zones.len(), 5);
        }

        for config in [
            LayoutConfig { dock_height: -5000.0, ..LayoutConfig::default() },
            LayoutConfig { staging_height: f64::NAN, ..LayoutConfig::default() },
            LayoutConfig { dock_width: f64::INFINITY, ..LayoutConfig::default() },
        ] {
            let layout = build_layout(&config);
            assert_eq!(layout.cells.len(), 5 * 80);
            assert!(layout.dock_doors.is_empty());
            assert!(layout.staging_areas.is_empty());
            assert_eq!(layout.zones.len(), 5);
            assert!(layout.bounds().height >= 0.0);
        }
    }

    #[test]
    fn test_repeated_aisle_labels_are_skipped() {
        let config = LayoutConfig {
            aisle_labels: vec!["A1".into(), "A2".into(), "A1".into()],
            ..LayoutConfig::default()
        };
        let layout = build_layout(&config);

        assert_eq!(layout.config.aisle_labels, vec!["A1", "A2"]);
        assert_eq!(layout.cells.len(), 2 * 80);
        let unique: std::collections::HashSet<_> =
            layout.cells.iter().map(|cell| cell.cell_id.as_str()).collect();
        assert_eq!(unique.len(), layout.cells.len());
        assert_eq!(layout.find_cell("A1-B01-L1-D1").unwrap().aisle_index, 0);
        assert_eq!(layout.aisle_count(), 2);
    }

    #[test]
    fn test_builder_matches_config() {
        let built = WarehouseLayoutBuilder::new()
            .aisles(["A1", "A2"])
            .bins_per_aisle(2)
            .levels(1)
            .depth(1)
            .dock_doors(0)
            .build();
        let direct = build_layout(&two_by_two());

        assert_eq!(built.cells, direct.cells);
        assert_eq!(built.bounds, direct.bounds);
    }

    #[test]
    fn test_layout_stats() {
        let stats = build_layout(&LayoutConfig::default()).stats();

        assert_eq!(stats.cell_count, 400);
        assert_eq!(stats.aisle_count, 5);
        assert_eq!(stats.dock_count, 6);
        assert_eq!(stats.occupied_docks, 2);
        assert_eq!(stats.occupied_staging, 2);
        assert_eq!(stats.storage_area, 400.0 * 40.0 * 30.0);
    }

    #[test]
    fn test_location_position_resolves_zones_and_cells() {
        let layout = build_layout(&LayoutConfig::default());

        assert!(layout.location_position("RECV-01").is_some());
        assert_eq!(layout.location_position("A1-B01-L1-D1"), Some(Point::new(60.0, 15.0)));
        assert!(layout.location_position("STG-02").is_some());
        assert!(layout.location_position("NOWHERE").is_none());
    }
}
