//! Per-kind movement parameters
//!
//! Forklifts, pallet trucks, reach trucks and AGVs share one resource record
//! and differ only in the numbers below. Trail generation and the live
//! simulator both look them up by kind.

use crate::types::{ResourceId, ResourceKind};

/// Movement parameters for one kind of equipment
#[derive(Debug, Clone, PartialEq)]
pub struct MovementProfile {
    /// Kind this profile belongs to; `None` for the random-walk fallback
    pub kind: Option<ResourceKind>,
    /// Multiplier applied to the time range when seeding a trail
    pub seed_time_factor: i64,
    /// Most waypoints a single trail may contain
    pub max_waypoints: usize,
    /// Shortest base interval between two waypoints
    pub min_step_ms: i64,
    /// Probability that a trail stop is an aisle cell rather than a zone
    pub aisle_visit_weight: f64,
    /// Probability of staying in the id-derived primary aisle, if the kind has one
    pub primary_aisle_affinity: Option<f64>,
    /// Probability that a trail starts loaded
    pub start_loaded_probability: f64,
    /// Probability that the load flag flips at a trail stop
    pub load_toggle_probability: f64,
    /// Nominal live speed before jitter
    pub base_speed: f64,
    /// Minimum idle time after reaching a live target
    pub dwell_min_ms: u64,
    /// Maximum idle time after reaching a live target
    pub dwell_max_ms: u64,
    /// Probability that a live target is a long traversal rather than a zone visit
    pub traversal_weight: f64,
    /// Probability that the load flag flips on arrival at a live target
    pub arrival_load_flip: f64,
}

static PROFILES: [MovementProfile; 4] = [
    MovementProfile {
        kind: Some(ResourceKind::Forklift),
        seed_time_factor: 1,
        max_waypoints: 20,
        min_step_ms: 30_000,
        aisle_visit_weight: 0.6,
        primary_aisle_affinity: Some(0.8),
        start_loaded_probability: 0.3,
        load_toggle_probability: 0.3,
        base_speed: 2.0,
        dwell_min_ms: 2_000,
        dwell_max_ms: 6_000,
        traversal_weight: 0.8,
        arrival_load_flip: 0.3,
    },
    MovementProfile {
        kind: Some(ResourceKind::PalletTruck),
        seed_time_factor: 2,
        max_waypoints: 15,
        min_step_ms: 45_000,
        aisle_visit_weight: 0.7,
        primary_aisle_affinity: None,
        start_loaded_probability: 0.4,
        load_toggle_probability: 0.4,
        base_speed: 1.6,
        dwell_min_ms: 3_000,
        dwell_max_ms: 8_000,
        traversal_weight: 0.7,
        arrival_load_flip: 0.4,
    },
    MovementProfile {
        kind: Some(ResourceKind::ReachTruck),
        seed_time_factor: 3,
        max_waypoints: 18,
        min_step_ms: 40_000,
        aisle_visit_weight: 0.75,
        primary_aisle_affinity: Some(0.9),
        start_loaded_probability: 0.3,
        load_toggle_probability: 0.25,
        base_speed: 1.4,
        dwell_min_ms: 4_000,
        dwell_max_ms: 9_000,
        traversal_weight: 0.85,
        arrival_load_flip: 0.25,
    },
    MovementProfile {
        kind: Some(ResourceKind::Agv),
        seed_time_factor: 4,
        max_waypoints: 12,
        min_step_ms: 60_000,
        aisle_visit_weight: 0.5,
        primary_aisle_affinity: None,
        start_loaded_probability: 0.5,
        load_toggle_probability: 0.5,
        base_speed: 1.2,
        dwell_min_ms: 1_000,
        dwell_max_ms: 3_000,
        traversal_weight: 0.6,
        arrival_load_flip: 0.5,
    },
];

static RANDOM_WALK: MovementProfile = MovementProfile {
    kind: None,
    seed_time_factor: 5,
    max_waypoints: 12,
    min_step_ms: 60_000,
    aisle_visit_weight: 0.0,
    primary_aisle_affinity: None,
    start_loaded_probability: 0.5,
    load_toggle_probability: 0.5,
    base_speed: 1.0,
    dwell_min_ms: 2_000,
    dwell_max_ms: 5_000,
    traversal_weight: 0.5,
    arrival_load_flip: 0.5,
};

impl MovementProfile {
    /// Profile for a known kind of equipment
    pub fn for_kind(kind: ResourceKind) -> &'static MovementProfile {
        PROFILES.iter().find(|p| p.kind == Some(kind)).unwrap_or(&RANDOM_WALK)
    }

    /// Profile used for ids with an unrecognised prefix
    pub fn random_walk() -> &'static MovementProfile {
        &RANDOM_WALK
    }

    /// Resolve the profile from a resource id prefix
    pub fn for_resource(id: &ResourceId) -> &'static MovementProfile {
        match id.kind() {
            Some(kind) => Self::for_kind(kind),
            None => Self::random_walk(),
        }
    }

    /// Whether this is the random-walk fallback
    pub fn is_random_walk(&self) -> bool {
        self.kind.is_none()
    }
}
