//! Enumeration types for the warehouse twin
//!
//! This module contains the heatmap metrics, resource kinds and statuses,
//! dock states, trail actions, travel directions and named zone kinds.

use crate::simulation::WarehouseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Synthetic intensity overlays that can be drawn over the storage cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapMetric {
    /// Pick/put volume, concentrated near the entrance aisles
    Volume,
    /// Access frequency, like volume with more variance
    Frequency,
    /// Slot occupancy, high almost everywhere
    Occupancy,
    /// Sparse misplaced-stock events
    Misplacement,
    /// Sparse expiry warnings, biased to the top level
    Expiry,
    /// Very rare critical exceptions
    Exceptions,
}

impl HeatmapMetric {
    /// Every metric in display order
    pub const ALL: [HeatmapMetric; 6] = [
        HeatmapMetric::Volume,
        HeatmapMetric::Frequency,
        HeatmapMetric::Occupancy,
        HeatmapMetric::Misplacement,
        HeatmapMetric::Expiry,
        HeatmapMetric::Exceptions,
    ];

    /// Lowercase wire name of the metric
    pub fn as_str(&self) -> &'static str {
        match self {
            HeatmapMetric::Volume => "volume",
            HeatmapMetric::Frequency => "frequency",
            HeatmapMetric::Occupancy => "occupancy",
            HeatmapMetric::Misplacement => "misplacement",
            HeatmapMetric::Expiry => "expiry",
            HeatmapMetric::Exceptions => "exceptions",
        }
    }
}

impl fmt::Display for HeatmapMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeatmapMetric {
    type Err = WarehouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "volume" => Ok(HeatmapMetric::Volume),
            "frequency" => Ok(HeatmapMetric::Frequency),
            "occupancy" => Ok(HeatmapMetric::Occupancy),
            "misplacement" => Ok(HeatmapMetric::Misplacement),
            "expiry" => Ok(HeatmapMetric::Expiry),
            "exceptions" => Ok(HeatmapMetric::Exceptions),
            _ => Err(WarehouseError::unsupported_metric(s)),
        }
    }
}

/// Kinds of material-handling equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Counterbalance forklift, works up and down its aisles
    Forklift,
    /// Battery-operated pallet truck (BOPT), crosses the floor and visits staging
    #[serde(rename = "bopt")]
    PalletTruck,
    /// Narrow-aisle reach truck, strongly bound to one aisle
    ReachTruck,
    /// Automated guided vehicle
    Agv,
}

impl ResourceKind {
    /// Every kind in roster order
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Forklift,
        ResourceKind::PalletTruck,
        ResourceKind::ReachTruck,
        ResourceKind::Agv,
    ];

    /// Id prefix used by this kind (`FL`, `BOPT`, `RT`, `AGV`)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ResourceKind::Forklift => "FL",
            ResourceKind::PalletTruck => "BOPT",
            ResourceKind::ReachTruck => "RT",
            ResourceKind::Agv => "AGV",
        }
    }

    /// Resolve a kind from an id prefix, case-insensitively
    pub fn from_id_prefix(prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id_prefix().eq_ignore_ascii_case(prefix))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Forklift => write!(f, "Forklift"),
            ResourceKind::PalletTruck => write!(f, "Pallet Truck"),
            ResourceKind::ReachTruck => write!(f, "Reach Truck"),
            ResourceKind::Agv => write!(f, "AGV"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forklift" | "fl" => Ok(ResourceKind::Forklift),
            "pallet truck" | "pallettruck" | "bopt" => Ok(ResourceKind::PalletTruck),
            "reach truck" | "reachtruck" | "rt" => Ok(ResourceKind::ReachTruck),
            "agv" => Ok(ResourceKind::Agv),
            _ => Err(format!("Unknown resource kind: {}", s)),
        }
    }
}

/// Operational status of a simulated resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    /// Moving toward a target
    Active,
    /// Dwelling at a position until its next wake time
    Idle,
    /// Out of service, never moves
    Maintenance,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceStatus::Active => write!(f, "active"),
            ResourceStatus::Idle => write!(f, "idle"),
            ResourceStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl FromStr for ResourceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ResourceStatus::Active),
            "idle" => Ok(ResourceStatus::Idle),
            "maintenance" => Ok(ResourceStatus::Maintenance),
            _ => Err(format!("Unknown resource status: {}", s)),
        }
    }
}

/// Decorative state of a dock door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockStatus {
    /// Door open, no trailer
    Open,
    /// Door closed
    Closed,
    /// Trailer at the door
    Occupied,
}

impl DockStatus {
    /// Status assigned to the dock at `index` (open, closed, occupied, repeating)
    pub fn for_index(index: usize) -> Self {
        match index % 3 {
            0 => DockStatus::Open,
            1 => DockStatus::Closed,
            _ => DockStatus::Occupied,
        }
    }
}

impl fmt::Display for DockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockStatus::Open => write!(f, "open"),
            DockStatus::Closed => write!(f, "closed"),
            DockStatus::Occupied => write!(f, "occupied"),
        }
    }
}

/// What a resource did at a trail waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailAction {
    /// Picked up a load
    Pickup,
    /// Dropped off its load
    Dropoff,
    /// Passed through without changing load
    Transit,
}

impl fmt::Display for TrailAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailAction::Pickup => write!(f, "pickup"),
            TrailAction::Dropoff => write!(f, "dropoff"),
            TrailAction::Transit => write!(f, "transit"),
        }
    }
}

/// Heading of a moving resource in render space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward smaller y
    Up,
    /// Toward larger y
    Down,
    /// Toward smaller x
    Left,
    /// Toward larger x
    Right,
}

/// Named floor zones used as trail destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Inbound goods area
    Receiving,
    /// Outbound goods area
    Shipping,
    /// Central staging lane
    Staging,
    /// Equipment maintenance bay
    Maintenance,
    /// Floor office
    Office,
}

impl ZoneKind {
    /// Every zone kind
    pub const ALL: [ZoneKind; 5] = [
        ZoneKind::Receiving,
        ZoneKind::Shipping,
        ZoneKind::Staging,
        ZoneKind::Maintenance,
        ZoneKind::Office,
    ];

    /// Location id of the zone, e.g. `RECV-01`
    pub fn location_id(&self) -> &'static str {
        match self {
            ZoneKind::Receiving => "RECV-01",
            ZoneKind::Shipping => "SHIP-01",
            ZoneKind::Staging => "STAGE-01",
            ZoneKind::Maintenance => "MAINT-01",
            ZoneKind::Office => "OFFICE-01",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneKind::Receiving => write!(f, "Receiving"),
            ZoneKind::Shipping => write!(f, "Shipping"),
            ZoneKind::Staging => write!(f, "Staging"),
            ZoneKind::Maintenance => write!(f, "Maintenance"),
            ZoneKind::Office => write!(f, "Office"),
        }
    }
}
