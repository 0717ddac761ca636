//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    KeyQuery, KeyValue, MGetRequest, MSetRequest, PopRequest, PushRequest, RangeQuery, SetRequest,
};
pub use responses::{
    CleanupResponse, DeleteResponse, GetResponse, HealthResponse, KeysResponse, LengthResponse,
    MGetResponse, MSetResponse, MessageResponse, RangeResponse, SetResponse, SizeResponse,
    StatsResponse, TtlResponse,
};
