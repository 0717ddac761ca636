//! API Handlers
//!
//! HTTP request handlers translating requests into cache service calls.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CleanupResponse, DeleteResponse, GetResponse, HealthResponse, KeyQuery, KeysResponse,
    LengthResponse, MGetRequest, MGetResponse, MSetRequest, MSetResponse, MessageResponse,
    PopRequest, PushRequest, RangeQuery, RangeResponse, SetRequest, SetResponse, SizeResponse,
    StatsResponse, TtlResponse,
};
use crate::service::CacheService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheService,
}

impl AppState {
    pub fn new(cache: CacheService) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(CacheService::from_config(config)?))
    }
}

// == Scalar Handlers ==

/// Handler for POST /api/v1/set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    state.cache.set(&req.key, req.value, req.ttl)?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /api/v1/get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /api/v1/del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.cache.delete(&key);

    Json(DeleteResponse { key, deleted })
}

/// Handler for POST /api/v1/mset
pub async fn mset_handler(
    State(state): State<AppState>,
    Json(req): Json<MSetRequest>,
) -> Result<Json<MSetResponse>> {
    req.validate()?;

    let ttl = req.ttl;
    let pairs = req.into_pairs();
    let count = pairs.len();
    state.cache.mset(pairs, ttl)?;

    Ok(Json(MSetResponse { count }))
}

/// Handler for POST /api/v1/mget
pub async fn mget_handler(
    State(state): State<AppState>,
    Json(req): Json<MGetRequest>,
) -> Json<MGetResponse> {
    Json(MGetResponse {
        values: state.cache.mget(&req.keys),
    })
}

/// Handler for GET /api/v1/keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse {
        keys: state.cache.keys(),
    })
}

/// Handler for GET /api/v1/size
pub async fn size_handler(State(state): State<AppState>) -> Json<SizeResponse> {
    Json(SizeResponse {
        size: state.cache.size(),
    })
}

/// Handler for POST /api/v1/clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.clear();
    Json(MessageResponse::new("Cache cleared"))
}

/// Handler for POST /api/v1/cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    Json(CleanupResponse {
        removed: state.cache.cleanup(),
    })
}

/// Handler for GET /api/v1/ttl/:key
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TtlResponse>> {
    let ttl = state.cache.ttl(&key)?;

    Ok(Json(TtlResponse { key, ttl }))
}

// == List Handlers ==

/// Handler for POST /api/v1/lpush
pub async fn lpush_handler(
    State(state): State<AppState>,
    Json(req): Json<PushRequest>,
) -> Result<Json<LengthResponse>> {
    let length = state.cache.lpush(&req.key, req.value)?;

    Ok(Json(LengthResponse {
        key: req.key,
        length,
    }))
}

/// Handler for POST /api/v1/rpush
pub async fn rpush_handler(
    State(state): State<AppState>,
    Json(req): Json<PushRequest>,
) -> Result<Json<LengthResponse>> {
    let length = state.cache.rpush(&req.key, req.value)?;

    Ok(Json(LengthResponse {
        key: req.key,
        length,
    }))
}

/// Handler for POST /api/v1/lpop
pub async fn lpop_handler(
    State(state): State<AppState>,
    Json(req): Json<PopRequest>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.lpop(&req.key)?;

    Ok(Json(GetResponse::new(req.key, value)))
}

/// Handler for POST /api/v1/rpop
pub async fn rpop_handler(
    State(state): State<AppState>,
    Json(req): Json<PopRequest>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.rpop(&req.key)?;

    Ok(Json(GetResponse::new(req.key, value)))
}

/// Handler for GET /api/v1/lrange?key=..&start=..&stop=..
pub async fn lrange_handler(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<RangeResponse>> {
    let values = state.cache.lrange(&query.key, query.start, query.stop)?;

    Ok(Json(RangeResponse {
        key: query.key,
        values,
    }))
}

/// Handler for GET /api/v1/llen?key=..
pub async fn llen_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<LengthResponse>> {
    let length = state.cache.llen(&query.key)?;

    Ok(Json(LengthResponse {
        key: query.key,
        length,
    }))
}

// == Operational Handlers ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
