//! Memoized flight paths keyed by their exact endpoints.

use crate::models::LngLat;
use dashmap::DashMap;

/// Cache key: both endpoints identified bit for bit.
///
/// Proximity never collapses entries. Two endpoint pairs that differ in
/// the last bit are distinct keys, and each triggers its own search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EndpointKey {
    start: (u64, u64),
    end: (u64, u64),
}

impl EndpointKey {
    fn new(start: LngLat, end: LngLat) -> Self {
        Self {
            start: start.bits(),
            end: end.bits(),
        }
    }
}

/// Concurrent two-table memo for planned paths.
///
/// Outbound and return searches cache separately: the return leg's
/// central-area policy can produce a different path for the same pair of
/// endpoints. Stored paths are never mutated after insertion, and lookups
/// hand out owned copies, so no caller can corrupt another's result.
#[derive(Debug, Default)]
pub struct PathCache {
    outbound: DashMap<EndpointKey, Vec<LngLat>>,
    inbound: DashMap<EndpointKey, Vec<LngLat>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the cached path for these exact endpoints, if present.
    pub fn get(&self, start: LngLat, end: LngLat, is_return_path: bool) -> Option<Vec<LngLat>> {
        self.table(is_return_path)
            .get(&EndpointKey::new(start, end))
            .map(|entry| entry.value().clone())
    }

    /// Store a copy of `path` for these endpoints.
    pub fn insert(&self, start: LngLat, end: LngLat, is_return_path: bool, path: &[LngLat]) {
        self.table(is_return_path)
            .insert(EndpointKey::new(start, end), path.to_vec());
    }

    /// Drop every cached path from both tables.
    pub fn clear(&self) {
        self.outbound.clear();
        self.inbound.clear();
    }

    /// Number of cached paths across both tables.
    pub fn len(&self) -> usize {
        self.outbound.len() + self.inbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self, is_return_path: bool) -> &DashMap<EndpointKey, Vec<LngLat>> {
        if is_return_path {
            &self.inbound
        } else {
            &self.outbound
        }
    }
}
