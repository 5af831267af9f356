//! Live resource records

use crate::layout::Point;
use crate::trails::TrailPoint;
use crate::types::{Direction, ResourceId, ResourceKind, ResourceStatus};
use serde::Serialize;

/// A piece of equipment owned by the resource simulator
///
/// Consumers only ever see clones; the simulator mutates its own copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedResource {
    /// `FL-001`, `BOPT-002`, ...
    pub id: ResourceId,
    /// Kind of equipment
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Whether a load is on the forks
    pub loaded: bool,
    /// Nominal speed; the per-tick step is this times the configured scale
    pub speed: f64,
    /// Operational status
    pub status: ResourceStatus,
    /// Current motion goal, horizontal
    pub target_x: f64,
    /// Current motion goal, vertical
    pub target_y: f64,
    /// Heading of the last step, `None` before the first move
    pub direction: Option<Direction>,
    /// Label of the aisle band the resource is in, if any
    pub current_aisle: Option<String>,
    /// Recent positions, oldest first, bounded by the retention window
    pub trail: Vec<TrailPoint>,
}

impl SimulatedResource {
    /// Create a resource parked at a position
    pub fn new(
        id: ResourceId,
        kind: ResourceKind,
        position: Point,
        speed: f64,
        loaded: bool,
    ) -> Self {
        Self {
            id,
            kind,
            x: position.x,
            y: position.y,
            loaded,
            speed,
            status: ResourceStatus::Idle,
            target_x: position.x,
            target_y: position.y,
            direction: None,
            current_aisle: None,
            trail: Vec::new(),
        }
    }

    /// Current position
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Current motion goal
    pub fn target(&self) -> Point {
        Point::new(self.target_x, self.target_y)
    }

    /// Whether the resource sits on its target
    pub fn has_arrived(&self) -> bool {
        (self.x - self.target_x).abs() < f64::EPSILON
            && (self.y - self.target_y).abs() < f64::EPSILON
    }

    /// Move up to `step` toward the target, horizontally first, then vertically
    ///
    /// Returns `true` once the target is reached.
    pub fn step_toward_target(&mut self, step: f64) -> bool {
        let mut budget = step.max(0.0);

        let dx = self.target_x - self.x;
        if dx.abs() > f64::EPSILON {
            let delta = dx.abs().min(budget);
            self.x += delta * dx.signum();
            self.direction = Some(if dx > 0.0 { Direction::Right } else { Direction::Left });
            if delta < dx.abs() {
                return false;
            }
            self.x = self.target_x;
            budget -= delta;
        }

        let dy = self.target_y - self.y;
        if dy.abs() > f64::EPSILON {
            let delta = dy.abs().min(budget);
            if delta <= 0.0 {
                return false;
            }
            self.y += delta * dy.signum();
            self.direction = Some(if dy > 0.0 { Direction::Down } else { Direction::Up });
            if delta < dy.abs() {
                return false;
            }
            self.y = self.target_y;
        }
        true
    }
}
