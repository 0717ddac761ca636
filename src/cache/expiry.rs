//! Expiry Module
//!
//! Lazy per-key expiration and the full purge pass used by the sweeper.

use crate::cache::entry::current_timestamp_ms;
use crate::cache::CacheStore;

impl CacheStore {
    // == Lazy Expiry ==
    /// Removes `key` if its TTL has elapsed.
    ///
    /// Returns true when an expired entry was purged. Every operation that
    /// addresses a single key calls this first, so expired entries are never
    /// observable even if the sweeper has not run yet.
    pub fn purge_if_expired(&mut self, key: &str) -> bool {
        let expired = self.entries.get(key).is_some_and(|e| e.is_expired());
        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
        }
        expired
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }
}
