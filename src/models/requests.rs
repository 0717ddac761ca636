//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Request body for POST /api/v1/set
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl`: TTL in seconds, omitted or `0` means no expiry
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub ttl: u64,
}

/// One key/value pair inside an [`MSetRequest`].
#[derive(Debug, Clone, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Request body for POST /api/v1/mset
#[derive(Debug, Clone, Deserialize)]
pub struct MSetRequest {
    pub pairs: Vec<KeyValue>,
    #[serde(default)]
    pub ttl: u64,
}

impl MSetRequest {
    /// Rejects an empty batch. Keys and values are checked by the store.
    pub fn validate(&self) -> Result<()> {
        if self.pairs.is_empty() {
            return Err(CacheError::InvalidRequest(
                "At least one pair is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs.into_iter().map(|p| (p.key, p.value)).collect()
    }
}

/// Request body for POST /api/v1/mget
#[derive(Debug, Clone, Deserialize)]
pub struct MGetRequest {
    pub keys: Vec<String>,
}

/// Request body for POST /api/v1/lpush and /api/v1/rpush
#[derive(Debug, Clone, Deserialize)]
pub struct PushRequest {
    pub key: String,
    pub value: String,
}

/// Request body for POST /api/v1/lpop and /api/v1/rpop
#[derive(Debug, Clone, Deserialize)]
pub struct PopRequest {
    pub key: String,
}

/// Query string for GET /api/v1/lrange
///
/// Bounds default to the whole list.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeQuery {
    pub key: String,
    #[serde(default)]
    pub start: i64,
    #[serde(default = "default_stop")]
    pub stop: i64,
}

/// Query string for GET /api/v1/llen
#[derive(Debug, Clone, Deserialize)]
pub struct KeyQuery {
    pub key: String,
}

fn default_stop() -> i64 {
    -1
}
