//! Boundary payloads
//!
//! JSON shapes exchanged with a dashboard front end: the health probe, the
//! static layout echo and the forklift position feed. The feed is its own
//! small simulation, jittering a fixed baseline, and is not kept consistent
//! with [`ResourceSimulator`](crate::simulation::ResourceSimulator).

use crate::types::{LayoutConfig, ResourceId, ResourceStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Interval between position feed updates
pub const POSITION_FEED_INTERVAL_MS: u64 = 1_000;

/// Half-width of the per-axis jitter applied to feed positions
pub const POSITION_JITTER: f64 = 10.0;

/// Probability that a feed update reports the opposite load state
pub const LOAD_FLIP_PROBABILITY: f64 = 0.1;

/// Health probe response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `ok`
    pub status: String,
    /// ISO-8601 time of the probe
    pub timestamp: String,
}

impl HealthStatus {
    /// Healthy response stamped with `now`
    pub fn ok(now: DateTime<Utc>) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Echo of the active layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    /// Aisle labels in order
    pub aisles: Vec<String>,
    /// Bins along each aisle
    pub bins_per_aisle: u32,
    /// Storage levels
    pub levels: u32,
    /// Rack depth
    pub depth: u32,
    /// Cell width
    pub cell_width: f64,
    /// Cell height
    pub cell_height: f64,
    /// Aisle width
    pub aisle_width: f64,
}

impl From<&LayoutConfig> for LayoutSummary {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            aisles: config.aisle_labels.clone(),
            bins_per_aisle: config.bins_per_aisle,
            levels: config.levels,
            depth: config.depth,
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            aisle_width: config.aisle_width,
        }
    }
}

/// One forklift in a position message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForkliftPosition {
    /// Resource id
    pub id: ResourceId,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Whether a load is on the forks
    pub loaded: bool,
    /// Nominal speed
    pub speed: f64,
    /// Operational status
    pub status: ResourceStatus,
}

/// Position feed message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionsMessage {
    /// Always `forklift_positions`
    #[serde(rename = "type")]
    pub message_type: String,
    /// Current positions
    pub data: Vec<ForkliftPosition>,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl PositionsMessage {
    /// Message type tag of the position feed
    pub const TYPE: &'static str = "forklift_positions";

    /// Wrap positions into a feed message
    pub fn new(data: Vec<ForkliftPosition>, timestamp: i64) -> Self {
        Self { message_type: Self::TYPE.to_string(), data, timestamp }
    }
}

/// Jittered forklift feed around a fixed baseline
#[derive(Debug)]
pub struct PositionJitterFeed {
    baseline: Vec<ForkliftPosition>,
    rng: StdRng,
}

impl PositionJitterFeed {
    /// Feed over the classic three-forklift baseline
    pub fn new(seed: Option<u64>) -> Self {
        let baseline = [
            ("FL-001", 100.0, 150.0, true, 2.3),
            ("FL-002", 300.0, 250.0, false, 1.8),
            ("FL-003", 500.0, 180.0, true, 2.1),
        ]
        .into_iter()
        .map(|(id, x, y, loaded, speed)| ForkliftPosition {
            id: ResourceId::from(id),
            x,
            y,
            loaded,
            speed,
            status: ResourceStatus::Active,
        })
        .collect();
        Self::with_baseline(baseline, seed)
    }

    /// Feed over a custom baseline
    pub fn with_baseline(baseline: Vec<ForkliftPosition>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { baseline, rng }
    }

    /// Baseline positions
    pub fn baseline(&self) -> &[ForkliftPosition] {
        &self.baseline
    }

    /// Message sent when a client connects: the baseline unchanged
    pub fn initial_message(&self, now_ms: i64) -> PositionsMessage {
        PositionsMessage::new(self.baseline.clone(), now_ms)
    }

    /// Periodic update: every baseline position jittered independently
    ///
    /// Jitter is relative to the baseline, not to the previous update, so the
    /// reported positions never drift.
    pub fn next_message(&mut self, now_ms: i64) -> PositionsMessage {
        let mut data = Vec::with_capacity(self.baseline.len());
        for forklift in &self.baseline {
            let dx = (self.rng.gen::<f64>() - 0.5) * 2.0 * POSITION_JITTER;
            let dy = (self.rng.gen::<f64>() - 0.5) * 2.0 * POSITION_JITTER;
            let flip = self.rng.gen_bool(LOAD_FLIP_PROBABILITY);
            data.push(ForkliftPosition {
                x: forklift.x + dx,
                y: forklift.y + dy,
                loaded: forklift.loaded != flip,
                ..forklift.clone()
            });
        }
        PositionsMessage::new(data, now_ms)
    }
}
