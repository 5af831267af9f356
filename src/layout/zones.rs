//! Named floor zones
//!
//! Receiving, shipping and staging sit on the staging row (first, last and
//! middle staging area). Maintenance and office occupy the left margin beside
//! the racks. Without dock doors the first three fall back to points along the
//! cross aisle below the racks.

use crate::layout::cell::StagingArea;
use crate::layout::geometry::{Point, Rect};
use crate::types::{LayoutConfig, ZoneKind};
use serde::Serialize;

/// A named trail destination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    /// Kind of zone
    pub kind: ZoneKind,
    /// Location id written into trail points, e.g. `RECV-01`
    pub id: String,
    /// Centre of the zone
    #[serde(flatten)]
    pub position: Point,
}

impl Zone {
    fn new(kind: ZoneKind, position: Point) -> Self {
        Self { kind, id: kind.location_id().to_string(), position }
    }
}

pub(crate) fn derive_zones(
    config: &LayoutConfig,
    staging_areas: &[StagingArea],
    bounds: &Rect,
    rack_height: f64,
) -> Vec<Zone> {
    let margin = config.dock_offset / 2.0;
    let cross_aisle_y = rack_height + margin;

    let (receiving, shipping, staging) = match (staging_areas.first(), staging_areas.last()) {
        (Some(first), Some(last)) => (
            first.rect.center(),
            last.rect.center(),
            staging_areas[staging_areas.len() / 2].rect.center(),
        ),
        _ => (
            Point::new(margin, cross_aisle_y),
            Point::new(bounds.right() - margin, cross_aisle_y),
            Point::new(bounds.center().x, cross_aisle_y),
        ),
    };

    let zones = vec![
        Zone::new(ZoneKind::Receiving, receiving),
        Zone::new(ZoneKind::Shipping, shipping),
        Zone::new(ZoneKind::Staging, staging),
        Zone::new(ZoneKind::Maintenance, Point::new(margin, rack_height)),
        Zone::new(ZoneKind::Office, Point::new(margin, rack_height / 2.0)),
    ];

    zones
        .into_iter()
        .map(|zone| Zone { position: bounds.clamp_point(zone.position, 0.0), ..zone })
        .collect()
}
