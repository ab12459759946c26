//! LRU Tracker Module
//!
//! Recency ordering for cache eviction.

use std::collections::{HashMap, VecDeque};

/// Stale queue slots tolerated before the queue is compacted.
const COMPACT_SLACK: usize = 32;

// == LRU Tracker ==
/// Tracks touch order of keys for LRU eviction.
///
/// Each touch appends `(stamp, key)` to the back of a queue and records the
/// stamp as the key's current one. Older slots for the same key become
/// tombstones and are skipped when popping from the front, so:
/// - Front = least recently touched
/// - Back = most recently touched
///
/// `touch`, `remove` and `evict_oldest` are O(1) amortized; the queue is
/// compacted once tombstones outnumber live keys.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Touch log, oldest first, possibly holding stale slots
    order: VecDeque<(u64, String)>,
    /// Current stamp per live key
    stamps: HashMap<String, u64>,
    next_stamp: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if new.
    pub fn touch(&mut self, key: &str) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        self.stamps.insert(key.to_string(), stamp);
        self.order.push_back((stamp, key.to_string()));
        self.maybe_compact();
    }

    // == Remove ==
    /// Stops tracking a key. Its queue slot is left behind as a tombstone.
    pub fn remove(&mut self, key: &str) {
        if self.stamps.remove(key).is_some() {
            self.maybe_compact();
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        while let Some((stamp, key)) = self.order.pop_front() {
            if self.stamps.get(&key) == Some(&stamp) {
                self.stamps.remove(&key);
                return Some(key);
            }
        }
        None
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order
            .iter()
            .find(|(stamp, key)| self.is_live(*stamp, key))
            .map(|(_, key)| key.as_str())
    }

    /// Live keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter(|(stamp, key)| self.is_live(*stamp, key))
            .map(|(_, key)| key.as_str())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.stamps.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.stamps.clear();
    }

    fn is_live(&self, stamp: u64, key: &str) -> bool {
        self.stamps.get(key) == Some(&stamp)
    }

    fn maybe_compact(&mut self) {
        if self.order.len() > 2 * self.stamps.len() + COMPACT_SLACK {
            let stamps = &self.stamps;
            self.order
                .retain(|(stamp, key)| stamps.get(key) == Some(stamp));
        }
    }
}
