//! LRU Index Module
//!
//! Eviction policy: picks the least recently touched key when the store is full.

use std::collections::BTreeSet;

// == LRU Index ==
/// Orders keys by their last touch for LRU eviction.
///
/// Every touch draws a fresh value from a monotonic logical clock, so recency is
/// strict even for touches within the same millisecond. The set is ordered by
/// `(tick, key)`; equal ticks fall back to lexicographic key order.
#[derive(Debug, Default)]
pub struct LruIndex {
    order: BTreeSet<(u64, String)>,
    clock: u64,
}

impl LruIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks `key` as most recently used and returns its new tick.
    ///
    /// `previous` is the tick currently recorded on the entry, if the key is
    /// already tracked.
    pub fn touch(&mut self, key: &str, previous: Option<u64>) -> u64 {
        if let Some(tick) = previous {
            self.order.remove(&(tick, key.to_string()));
        }
        self.clock += 1;
        self.order.insert((self.clock, key.to_string()));
        self.clock
    }

    // == Remove ==
    /// Stops tracking `key`.
    pub fn remove(&mut self, key: &str, tick: u64) {
        self.order.remove(&(tick, key.to_string()));
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the index is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str, tick: u64) -> bool {
        self.order.contains(&(tick, key.to_string()))
    }
}
