//! Identifier types for the warehouse twin
//!
//! This module contains the string-backed identifiers for storage cells and
//! simulated resources, plus the UUID-based handle returned when a listener
//! subscribes to the resource simulator.

use crate::types::ResourceKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a single storage cell, formatted `{aisle}-B{bin:02}-L{level}-D{depth}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(String);

/// The coordinates encoded in a [`CellId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellIdParts {
    /// Aisle label
    pub aisle: String,
    /// Bin position along the aisle (1-based)
    pub bin: u32,
    /// Vertical level (1-based)
    pub level: u32,
    /// Rack depth (1-based)
    pub depth: u32,
}

impl CellId {
    /// Compose a cell id from its coordinates
    pub fn new(aisle: &str, bin: u32, level: u32, depth: u32) -> Self {
        Self(format!("{}-B{:02}-L{}-D{}", aisle, bin, level, depth))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the id back into aisle, bin, level and depth
    pub fn parts(&self) -> Option<CellIdParts> {
        parse_cell_id(&self.0)
    }
}

fn parse_cell_id(s: &str) -> Option<CellIdParts> {
    // Aisle labels may themselves contain dashes, so split from the right.
    let mut pieces = s.rsplitn(4, '-');
    let depth = pieces.next()?.strip_prefix('D')?.parse().ok()?;
    let level = pieces.next()?.strip_prefix('L')?.parse().ok()?;
    let bin = pieces.next()?.strip_prefix('B')?.parse().ok()?;
    let aisle = pieces.next()?;
    if aisle.is_empty() {
        return None;
    }
    Some(CellIdParts { aisle: aisle.to_string(), bin, level, depth })
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CellId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cell_id(s) {
            Some(_) => Ok(Self(s.to_string())),
            None => Err(format!("Malformed cell id: {}", s)),
        }
    }
}

impl AsRef<str> for CellId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CellId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CellId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier of a simulated resource such as `FL-001` or `BOPT-003`
///
/// The prefix before the first dash selects the resource kind; ids with an
/// unrecognised prefix are still valid and fall back to a random-walk pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wrap an arbitrary id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the canonical roster id for a kind, e.g. `FL-001`
    pub fn for_kind(kind: ResourceKind, number: u32) -> Self {
        Self(format!("{}-{:03}", kind.id_prefix(), number))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the resource kind from the id prefix
    pub fn kind(&self) -> Option<ResourceKind> {
        let prefix = self.0.split('-').next()?;
        ResourceKind::from_id_prefix(prefix)
    }

    /// Numeric suffix of the id (`FL-002` gives 2), if any
    pub fn sequence_number(&self) -> Option<u32> {
        let digits: String = self
            .0
            .rsplit('-')
            .next()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(String::deserialize(deserializer)?))
    }
}

/// Handle returned when subscribing to resource snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub Uuid);

impl ListenerId {
    /// Create a new random listener ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LSN_{}", self.0.simple())
    }
}
