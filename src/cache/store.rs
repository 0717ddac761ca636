//! Cache Store Module
//!
//! Authoritative key to entry mapping with bounded capacity, LRU eviction and
//! lazy TTL expiration.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::entry::{current_timestamp_ms, expiry_from_ttl};
use crate::cache::{CacheEntry, CacheStats, LruIndex, Value, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
///
/// The store is not synchronized; callers share it through
/// [`CacheService`](crate::service::CacheService), which serializes access.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    pub(super) entries: HashMap<String, CacheEntry>,
    /// Recency order used for eviction
    pub(super) lru: LruIndex,
    /// Performance statistics
    pub(super) stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` keys.
    ///
    /// A capacity of zero is accepted here but every insertion will then fail
    /// with [`CacheError::CapacityConfig`].
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(4096)),
            lru: LruIndex::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Set ==
    /// Stores a scalar value, replacing whatever the key held before.
    ///
    /// A `ttl_seconds` of zero makes the entry permanent, clearing any previous
    /// expiry. If the key is new and the store is full, the least recently used
    /// entry is evicted first.
    pub fn set(&mut self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        validate_key(key)?;
        validate_value(&value)?;
        self.purge_if_expired(key);

        if let Some(entry) = self.entries.get_mut(key) {
            entry.value = Value::Scalar(value);
            entry.expires_at = expiry_from_ttl(current_timestamp_ms(), ttl_seconds);
            entry.last_touched = self.lru.touch(key, Some(entry.last_touched));
            return Ok(());
        }

        self.make_room()?;
        self.insert_new(key, Value::Scalar(value), ttl_seconds);
        Ok(())
    }

    // == Get ==
    /// Retrieves a scalar value by key.
    ///
    /// Expired entries are removed and reported as not found. A list entry
    /// yields [`CacheError::TypeMismatch`].
    pub fn get(&mut self, key: &str) -> Result<String> {
        self.purge_if_expired(key);

        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };

        let value = match &entry.value {
            Value::Scalar(value) => value.clone(),
            Value::List(_) => return Err(CacheError::TypeMismatch(key.to_string())),
        };

        entry.last_touched = self.lru.touch(key, Some(entry.last_touched));
        self.stats.record_hit();
        Ok(value)
    }

    // == Delete ==
    /// Removes a key of either kind and reports whether a live entry existed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.purge_if_expired(key) {
            return false;
        }
        self.remove_entry(key).is_some()
    }

    // == Keys ==
    /// Returns all live keys in lexicographic order.
    pub fn keys(&mut self) -> Vec<String> {
        self.purge_expired();
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    // == Size ==
    /// Returns the number of live entries, purging expired ones first.
    pub fn size(&mut self) -> usize {
        self.purge_expired();
        self.entries.len()
    }

    // == Clear ==
    /// Removes every entry unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Multi Set ==
    /// Stores several scalar values with a shared TTL.
    ///
    /// Every key and value is validated before anything is written.
    pub fn mset(&mut self, pairs: Vec<(String, String)>, ttl_seconds: u64) -> Result<()> {
        for (key, value) in &pairs {
            validate_key(key)?;
            validate_value(value)?;
        }
        for (key, value) in pairs {
            self.set(&key, value, ttl_seconds)?;
        }
        Ok(())
    }

    // == Multi Get ==
    /// Looks up several keys; absent, expired or list keys yield `None`.
    pub fn mget(&mut self, keys: &[String]) -> Vec<Option<String>> {
        keys.iter().map(|key| self.get(key).ok()).collect()
    }

    // == TTL ==
    /// Returns the remaining lifetime of a live key in seconds, `None` if the
    /// key never expires.
    pub fn ttl(&mut self, key: &str) -> Result<Option<u64>> {
        self.purge_if_expired(key);
        self.entries
            .get(key)
            .map(CacheEntry::ttl_remaining)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.capacity = self.capacity;
        stats
    }

    /// Number of physically stored entries, including expired ones not yet
    /// purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internal Helpers ==

    /// Frees one slot if the store is full.
    ///
    /// Expired entries are reclaimed first; a live key is evicted only if
    /// none were. Only called for keys that are not present, so a single
    /// eviction keeps `len <= capacity` after the insert.
    pub(super) fn make_room(&mut self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::CapacityConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.entries.len() < self.capacity {
            return Ok(());
        }
        if self.purge_expired() > 0 {
            return Ok(());
        }

        match self.lru.evict_oldest() {
            Some(victim) => {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!(key = %victim, "evicted least recently used entry");
                Ok(())
            }
            None => Err(CacheError::CapacityConfig(
                "eviction could not free a slot".to_string(),
            )),
        }
    }

    /// Inserts a fresh entry for a key known to be absent.
    pub(super) fn insert_new(&mut self, key: &str, value: Value, ttl_seconds: u64) {
        let tick = self.lru.touch(key, None);
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl_seconds, tick));
    }

    /// Removes an entry from both the map and the recency index.
    pub(super) fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key, entry.last_touched);
        Some(entry)
    }

    /// Asserts the structural invariants shared by the map and the index.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert!(
            self.entries.len() <= self.capacity,
            "store holds {} entries over capacity {}",
            self.entries.len(),
            self.capacity
        );
        assert_eq!(self.entries.len(), self.lru.len(), "index out of sync");
        for (key, entry) in &self.entries {
            assert!(
                self.lru.contains(key, entry.last_touched),
                "key {key} missing from recency index"
            );
            if let Value::List(list) = &entry.value {
                assert!(!list.is_empty(), "empty list left under {key}");
            }
        }
    }
}

// == Validation ==

pub(super) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

pub(super) fn validate_value(value: &str) -> Result<()> {
    if value.len() > MAX_VALUE_SIZE {
        return Err(CacheError::InvalidRequest(format!(
            "Value exceeds maximum size of {} bytes",
            MAX_VALUE_SIZE
        )));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn set(store: &mut CacheStore, key: &str, value: &str) {
        store.set(key, value.to_string(), 0).unwrap();
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        set(&mut store, "key1", "value1");

        assert_eq!(store.get("key1").unwrap(), "value1");
        assert_eq!(store.len(), 1);
        store.assert_consistent();
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(100);

        assert_eq!(
            store.get("nonexistent"),
            Err(CacheError::NotFound("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new(100);

        set(&mut store, "key1", "value1");

        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(store.is_empty());
        assert!(matches!(store.get("key1"), Err(CacheError::NotFound(_))));
        store.assert_consistent();
    }

    #[test]
    fn test_store_delete_list_entry() {
        let mut store = CacheStore::new(100);

        store.rpush("list", "a".to_string()).unwrap();

        assert!(store.delete("list"));
        assert_eq!(store.llen("list").unwrap(), 0);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100);

        set(&mut store, "key1", "value1");
        set(&mut store, "key1", "value2");

        assert_eq!(store.get("key1").unwrap(), "value2");
        assert_eq!(store.len(), 1);
        store.assert_consistent();
    }

    #[test]
    fn test_set_replaces_list_with_scalar() {
        let mut store = CacheStore::new(100);

        store.lpush("k", "x".to_string()).unwrap();
        set(&mut store, "k", "v");

        assert_eq!(store.get("k").unwrap(), "v");
        assert!(matches!(store.llen("k"), Err(CacheError::TypeMismatch(_))));
    }

    #[test]
    fn test_get_on_list_is_type_mismatch() {
        let mut store = CacheStore::new(100);

        store.lpush("k", "x".to_string()).unwrap();

        assert_eq!(
            store.get("k"),
            Err(CacheError::TypeMismatch("k".to_string()))
        );
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), 1).unwrap();
        assert!(store.get("key1").is_ok());

        sleep(Duration::from_millis(1100));

        assert!(matches!(store.get("key1"), Err(CacheError::NotFound(_))));
        assert!(store.is_empty(), "lazy expiry should remove the entry");
        assert_eq!(store.stats().expirations, 1);
        store.assert_consistent();
    }

    #[test]
    fn test_set_with_zero_ttl_clears_expiry() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), 1).unwrap();
        store.set("key1", "value2".to_string(), 0).unwrap();

        sleep(Duration::from_millis(1100));

        assert_eq!(store.get("key1").unwrap(), "value2");
        assert_eq!(store.ttl("key1").unwrap(), None);
    }

    #[test]
    fn test_delete_expired_reports_absent() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), 1).unwrap();
        sleep(Duration::from_millis(1100));

        assert!(!store.delete("key1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3);

        set(&mut store, "key1", "value1");
        set(&mut store, "key2", "value2");
        set(&mut store, "key3", "value3");
        set(&mut store, "key4", "value4");

        assert_eq!(store.len(), 3);
        assert!(matches!(store.get("key1"), Err(CacheError::NotFound(_))));
        assert!(store.get("key2").is_ok());
        assert!(store.get("key3").is_ok());
        assert!(store.get("key4").is_ok());
        assert_eq!(store.stats().evictions, 1);
        store.assert_consistent();
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(2);

        set(&mut store, "A", "a");
        set(&mut store, "B", "b");
        store.get("A").unwrap();
        set(&mut store, "C", "c");

        assert!(store.get("A").is_ok());
        assert!(matches!(store.get("B"), Err(CacheError::NotFound(_))));
        assert!(store.get("C").is_ok());
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::new(2);

        set(&mut store, "a", "1");
        set(&mut store, "b", "2");
        set(&mut store, "a", "3");

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_full_store_reclaims_expired_before_evicting() {
        let mut store = CacheStore::new(2);

        store.set("a", "1".to_string(), 1).unwrap();
        set(&mut store, "b", "2");
        // "a" becomes most recently used, so LRU alone would pick "b".
        store.get("a").unwrap();

        sleep(Duration::from_millis(1100));
        set(&mut store, "c", "3");

        assert_eq!(store.get("b").unwrap(), "2");
        assert_eq!(store.get("c").unwrap(), "3");
        assert_eq!(store.size(), 2);

        let stats = store.stats();
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 1);
        store.assert_consistent();
    }

    #[test]
    fn test_push_into_full_store_reclaims_expired() {
        let mut store = CacheStore::new(1);

        store.set("temp", "v".to_string(), 1).unwrap();
        sleep(Duration::from_millis(1100));

        assert_eq!(store.rpush("list", "x".to_string()).unwrap(), 1);
        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.keys(), vec!["list"]);
    }

    #[test]
    fn test_zero_capacity_is_config_error() {
        let mut store = CacheStore::new(0);

        assert!(matches!(
            store.set("k", "v".to_string(), 0),
            Err(CacheError::CapacityConfig(_))
        ));
        assert!(matches!(
            store.rpush("k", "v".to_string()),
            Err(CacheError::CapacityConfig(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_keys_sorted_and_live_only() {
        let mut store = CacheStore::new(100);

        set(&mut store, "b", "2");
        set(&mut store, "a", "1");
        store.rpush("c", "x".to_string()).unwrap();
        store.set("gone", "x".to_string(), 1).unwrap();

        sleep(Duration::from_millis(1100));

        assert_eq!(store.keys(), vec!["a", "b", "c"]);
        assert_eq!(store.size(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut store = CacheStore::new(100);

        set(&mut store, "a", "1");
        store.lpush("b", "x".to_string()).unwrap();
        store.clear();

        assert!(store.is_empty());
        assert!(store.keys().is_empty());
        store.assert_consistent();
    }

    #[test]
    fn test_mset_and_mget() {
        let mut store = CacheStore::new(100);

        store
            .mset(
                vec![
                    ("a".to_string(), "1".to_string()),
                    ("b".to_string(), "2".to_string()),
                ],
                0,
            )
            .unwrap();
        store.lpush("list", "x".to_string()).unwrap();

        let keys: Vec<String> = ["a", "missing", "b", "list"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(
            store.mget(&keys),
            vec![Some("1".to_string()), None, Some("2".to_string()), None]
        );
    }

    #[test]
    fn test_mset_validates_before_writing() {
        let mut store = CacheStore::new(100);

        let result = store.mset(
            vec![
                ("ok".to_string(), "1".to_string()),
                ("".to_string(), "2".to_string()),
            ],
            0,
        );

        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_ttl_lookup() {
        let mut store = CacheStore::new(100);

        store.set("temp", "v".to_string(), 30).unwrap();
        set(&mut store, "perm", "v");

        let remaining = store.ttl("temp").unwrap().unwrap();
        assert!((29..=30).contains(&remaining));
        assert_eq!(store.ttl("perm").unwrap(), None);
        assert!(matches!(store.ttl("missing"), Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100);

        set(&mut store, "key1", "value1");
        store.get("key1").unwrap();
        let _ = store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.capacity, 100);
    }

    #[test]
    fn test_store_key_validation() {
        let mut store = CacheStore::new(100);
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        assert!(matches!(
            store.set(&long_key, "value".to_string(), 0),
            Err(CacheError::InvalidRequest(_))
        ));
        assert!(matches!(
            store.set("", "value".to_string(), 0),
            Err(CacheError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_store_value_too_large() {
        let mut store = CacheStore::new(100);
        let large_value = "x".repeat(MAX_VALUE_SIZE + 1);

        assert!(matches!(
            store.set("key", large_value, 0),
            Err(CacheError::InvalidRequest(_))
        ));
    }
}
