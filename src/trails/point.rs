//! Trail waypoints and whole trails

use crate::layout::Point;
use crate::types::{ResourceId, ResourceKind, TrailAction};
use serde::{Deserialize, Serialize};

/// A timestamped waypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailPoint {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Whether the resource carries a load after this point
    pub loaded: bool,
    /// Epoch milliseconds
    pub timestamp: i64,
    /// Cell id, zone id or synthetic label of the position
    pub location_id: String,
    /// What happened at this point, if anything was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TrailAction>,
}

impl TrailPoint {
    /// Position as a point
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Time-ordered waypoints of one resource over one requested window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementTrail {
    /// Resource the trail belongs to
    pub resource_id: ResourceId,
    /// Kind resolved from the id prefix; `None` for the random-walk fallback
    pub kind: Option<ResourceKind>,
    /// Requested window length
    pub time_range_minutes: u32,
    /// Window start, epoch milliseconds
    pub window_start: i64,
    /// Window end ("now" when the trail was generated), epoch milliseconds
    pub window_end: i64,
    /// Waypoints, non-decreasing by timestamp
    pub points: Vec<TrailPoint>,
}

impl MovementTrail {
    /// Whether every timestamp is at least the previous one
    pub fn is_time_ordered(&self) -> bool {
        self.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
    }

    /// Whether every point lies inside the requested window
    pub fn is_within_window(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.timestamp >= self.window_start && p.timestamp <= self.window_end)
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trail has no waypoints
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(timestamp: i64, action: Option<TrailAction>) -> TrailPoint {
        TrailPoint {
            x: 1.0,
            y: 2.0,
            loaded: true,
            timestamp,
            location_id: "RECV-01".into(),
            action,
        }
    }

    #[test]
    fn test_point_serializes_camel_case() {
        let value = serde_json::to_value(point(5, Some(TrailAction::Pickup))).unwrap();
        assert_eq!(value["locationId"], "RECV-01");
        assert_eq!(value["action"], "pickup");

        let value = serde_json::to_value(point(5, None)).unwrap();
        assert!(value.get("action").is_none());
    }

    #[test]
    fn test_trail_ordering_checks() {
        let mut trail = MovementTrail {
            resource_id: ResourceId::from("FL-001"),
            kind: Some(ResourceKind::Forklift),
            time_range_minutes: 1,
            window_start: 0,
            window_end: 60_000,
            points: vec![point(0, None), point(10, None), point(10, None)],
        };
        assert!(trail.is_time_ordered());
        assert!(trail.is_within_window());

        trail.points.push(point(5, None));
        assert!(!trail.is_time_ordered());

        trail.points = vec![point(70_000, None)];
        assert!(!trail.is_within_window());
    }
}
