//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_handler, delete_handler, get_handler, health_handler, keys_handler,
    llen_handler, lpop_handler, lpush_handler, lrange_handler, mget_handler, mset_handler,
    rpop_handler, rpush_handler, set_handler, size_handler, stats_handler, ttl_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Cache operations live under `/api/v1`; `/stats` and `/health` sit at the
/// root.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let v1 = Router::new()
        .route("/set", post(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/mset", post(mset_handler))
        .route("/mget", post(mget_handler))
        .route("/keys", get(keys_handler))
        .route("/size", get(size_handler))
        .route("/clear", post(clear_handler))
        .route("/cleanup", post(cleanup_handler))
        .route("/ttl/:key", get(ttl_handler))
        .route("/lpush", post(lpush_handler))
        .route("/rpush", post(rpush_handler))
        .route("/lpop", post(lpop_handler))
        .route("/rpop", post(rpop_handler))
        .route("/lrange", get(lrange_handler))
        .route("/llen", get(llen_handler));

    Router::new()
        .nest("/api/v1", v1)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::CacheService;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::new(CacheService::new(100).unwrap()))
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        create_test_app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/set")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"key":"test","value":"hello"}"#))
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let request = Request::builder()
            .uri("/api/v1/get/nonexistent")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_llen_missing_key_is_ok() {
        let request = Request::builder()
            .uri("/api/v1/llen?key=nothing")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let request = Request::builder()
            .uri("/api/v2/get/x")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::NOT_FOUND);
    }
}
