//! Statistics collection and reporting
//!
//! Summaries over generated trails and live roster snapshots.

use crate::simulation::resource::SimulatedResource;
use crate::trails::{MovementTrail, TrailPoint};
use crate::types::{ResourceKind, ResourceStatus, TrailAction};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Summary of one trail
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailStatistics {
    /// Number of waypoints
    pub waypoints: usize,
    /// Sum of straight-line distances between consecutive waypoints
    pub distance: f64,
    /// Part of `distance` travelled with a load
    pub loaded_distance: f64,
    /// Waypoints where a load was picked up
    pub pickups: usize,
    /// Waypoints where a load was dropped off
    pub dropoffs: usize,
    /// Milliseconds between the first and the last waypoint
    pub duration_ms: i64,
    /// Share of `duration_ms` spent loaded, 0 for an empty trail
    pub loaded_fraction: f64,
}

impl TrailStatistics {
    /// Summarize a sequence of waypoints
    ///
    /// The leg from one waypoint to the next counts as loaded when the
    /// resource was loaded after the first of the two.
    pub fn from_points(points: &[TrailPoint]) -> Self {
        let mut stats = Self { waypoints: points.len(), ..Self::default() };
        let mut loaded_ms = 0;

        for point in points {
            match point.action {
                Some(TrailAction::Pickup) => stats.pickups += 1,
                Some(TrailAction::Dropoff) => stats.dropoffs += 1,
                _ => {}
            }
        }

        for pair in points.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let leg = from.position().distance_to(&to.position());
            stats.distance += leg;
            if from.loaded {
                stats.loaded_distance += leg;
                loaded_ms += to.timestamp - from.timestamp;
            }
        }

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            stats.duration_ms = last.timestamp - first.timestamp;
        }
        if stats.duration_ms > 0 {
            stats.loaded_fraction = loaded_ms as f64 / stats.duration_ms as f64;
        }
        stats
    }

    /// Summarize a trail
    pub fn from_trail(trail: &MovementTrail) -> Self {
        Self::from_points(&trail.points)
    }
}

impl fmt::Display for TrailStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trail Statistics:")?;
        writeln!(f, "  Waypoints: {}", self.waypoints)?;
        writeln!(
            f,
            "  Distance: {:.1} ({:.1} loaded)",
            self.distance, self.loaded_distance
        )?;
        writeln!(f, "  Pickups: {}, Dropoffs: {}", self.pickups, self.dropoffs)?;
        write!(
            f,
            "  Duration: {} min ({:.1}% loaded)",
            self.duration_ms / 60_000,
            self.loaded_fraction * 100.0
        )
    }
}

/// Counts over a roster snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatistics {
    /// Resources in the snapshot
    pub total: usize,
    /// Resources moving toward a target
    pub active: usize,
    /// Resources dwelling
    pub idle: usize,
    /// Resources out of service
    pub maintenance: usize,
    /// Resources carrying a load
    pub loaded: usize,
    /// Resources per kind
    pub by_kind: BTreeMap<ResourceKind, usize>,
}

impl FleetStatistics {
    /// Count a snapshot
    pub fn from_resources(resources: &[SimulatedResource]) -> Self {
        let mut stats = Self { total: resources.len(), ..Self::default() };
        for resource in resources {
            match resource.status {
                ResourceStatus::Active => stats.active += 1,
                ResourceStatus::Idle => stats.idle += 1,
                ResourceStatus::Maintenance => stats.maintenance += 1,
            }
            if resource.loaded {
                stats.loaded += 1;
            }
            *stats.by_kind.entry(resource.kind).or_insert(0) += 1;
        }
        stats
    }

    /// Percentage of resources carrying a load
    pub fn loaded_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.loaded as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for FleetStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fleet Statistics:")?;
        writeln!(f, "  Total Resources: {}", self.total)?;
        for (kind, count) in &self.by_kind {
            writeln!(f, "    {}: {}", kind, count)?;
        }
        writeln!(
            f,
            "  Active: {}, Idle: {}, Maintenance: {}",
            self.active, self.idle, self.maintenance
        )?;
        write!(f, "  Loaded: {} ({:.1}%)", self.loaded, self.loaded_percentage())
    }
}
