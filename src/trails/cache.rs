//! Trail cache keyed by `(resource id, time range)`
//!
//! Readers share a read lock; regenerating a key replaces the entry wholesale,
//! so two threads racing on the same key both store an identical trail and the
//! last write wins.

use crate::trails::generator::ActivityWindow;
use crate::trails::point::TrailPoint;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A cached trail and the window it was generated for
#[derive(Debug, Clone)]
pub(crate) struct CachedTrail {
    pub(crate) window: ActivityWindow,
    pub(crate) points: Arc<Vec<TrailPoint>>,
}

#[derive(Debug, Default)]
pub(crate) struct TrailCache {
    entries: RwLock<HashMap<(String, u32), CachedTrail>>,
}

impl TrailCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, resource_id: &str, time_range_minutes: u32) -> Option<CachedTrail> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&(resource_id.to_string(), time_range_minutes)).cloned()
    }

    pub(crate) fn insert(
        &self,
        resource_id: &str,
        time_range_minutes: u32,
        window: ActivityWindow,
        points: Vec<TrailPoint>,
    ) -> CachedTrail {
        let entry = CachedTrail { window, points: Arc::new(points) };
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert((resource_id.to_string(), time_range_minutes), entry.clone());
        entry
    }

    pub(crate) fn invalidate(&self, resource_id: &str) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(id, _), _| id != resource_id);
        before - entries.len()
    }

    pub(crate) fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
