//! Cache Statistics Module
//!
//! Tracks per-store counters: hits, misses, sets, deletes and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Per-store counters plus a point-in-time view of size and hit rate.
///
/// The counters live inside the store; [`CacheStore::stats`](super::CacheStore::stats)
/// hands out a snapshot with `size`, `max_size` and `hit_rate` filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Calls to `set`
    pub sets: u64,
    /// Explicit deletes that actually removed an entry
    pub deletes: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Entries currently stored (may include not-yet-swept expired ones)
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// hits / (hits + misses), 0.0 before the first lookup
    pub hit_rate: f64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Snapshot ==
    /// Returns a copy of the counters with the derived fields populated.
    pub fn snapshot(&self, size: usize, max_size: usize) -> Self {
        Self {
            size,
            max_size,
            hit_rate: self.hit_rate(),
            ..self.clone()
        }
    }
}
