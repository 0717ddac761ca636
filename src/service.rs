//! Cache Service
//!
//! The synchronized entry point shared by request handlers and the sweeper.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Service ==
/// Cloneable handle to a single shared [`CacheStore`].
///
/// Every method is synchronous and holds the lock for exactly one store call.
/// Anything that can touch recency or purge an expired key takes the write
/// lock; only [`stats`](Self::stats) and [`capacity`](Self::capacity) read.
#[derive(Debug, Clone)]
pub struct CacheService {
    store: Arc<RwLock<CacheStore>>,
}

impl CacheService {
    /// Creates a service around a new store holding at most `capacity` keys.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::CapacityConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            store: Arc::new(RwLock::new(CacheStore::new(capacity))),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.max_entries)
    }

    pub fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        self.store.write().set(key, value, ttl_seconds)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.store.write().get(key)
    }

    pub fn delete(&self, key: &str) -> bool {
        self.store.write().delete(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.store.write().keys()
    }

    pub fn size(&self) -> usize {
        self.store.write().size()
    }

    pub fn clear(&self) {
        self.store.write().clear()
    }

    pub fn mset(&self, pairs: Vec<(String, String)>, ttl_seconds: u64) -> Result<()> {
        self.store.write().mset(pairs, ttl_seconds)
    }

    pub fn mget(&self, keys: &[String]) -> Vec<Option<String>> {
        self.store.write().mget(keys)
    }

    pub fn ttl(&self, key: &str) -> Result<Option<u64>> {
        self.store.write().ttl(key)
    }

    pub fn lpush(&self, key: &str, value: String) -> Result<usize> {
        self.store.write().lpush(key, value)
    }

    pub fn rpush(&self, key: &str, value: String) -> Result<usize> {
        self.store.write().rpush(key, value)
    }

    pub fn lpop(&self, key: &str) -> Result<String> {
        self.store.write().lpop(key)
    }

    pub fn rpop(&self, key: &str) -> Result<String> {
        self.store.write().rpop(key)
    }

    pub fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        self.store.write().lrange(key, start, stop)
    }

    pub fn llen(&self, key: &str) -> Result<usize> {
        self.store.write().llen(key)
    }

    /// Runs one expiry pass and returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        self.store.write().purge_expired()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }

    pub fn capacity(&self) -> usize {
        self.store.read().capacity()
    }
}
