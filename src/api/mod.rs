//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /api/v1/set`, `GET /api/v1/get/:key`, `DELETE /api/v1/del/:key`
//! - `POST /api/v1/mset`, `POST /api/v1/mget`
//! - `GET /api/v1/keys`, `GET /api/v1/size`, `GET /api/v1/ttl/:key`
//! - `POST /api/v1/clear`, `POST /api/v1/cleanup`
//! - `POST /api/v1/{lpush,rpush,lpop,rpop}`, `GET /api/v1/{lrange,llen}`
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
