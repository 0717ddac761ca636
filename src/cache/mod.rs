//! Cache Module
//!
//! In-memory key-value storage with TTL expiration, LRU eviction and list
//! values.

mod entry;
mod expiry;
mod list;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Value};
pub use list::normalize_range;
pub use lru::LruIndex;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
