//! Lunar Cache - an in-memory key-value cache server
//!
//! Bounded capacity with LRU eviction, per-entry TTL with lazy and active
//! expiry, and list values with push/pop/range access.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::CacheError;
pub use service::CacheService;
pub use tasks::{spawn_sweeper, SweeperHandle};
