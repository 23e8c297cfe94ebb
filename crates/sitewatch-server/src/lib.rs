//! SiteWatch server library logic.
//!
//! Wires the compliance pipeline crates behind the dashboard HTTP API and
//! the background synthetic detection feed.

pub mod api_alerts;
pub mod api_detections;
pub mod api_stats;
pub mod background;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use sitewatch_alerts::AlertPolicy;
use sitewatch_db::DbPool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Maximum request body size (64 KiB). The API only accepts tiny bodies;
/// anything larger is a mistake or abuse.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Violation alerting policy.
    pub policy: AlertPolicy,
}

/// Errors surfaced through the HTTP API as JSON `{"error": ...}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Runs a closure against a pooled connection on the blocking thread pool.
///
/// Store calls are synchronous rusqlite operations; this keeps them off
/// the async workers. Pool exhaustion and join failures both surface as
/// retryable internal errors, never as a hung request.
pub(crate) async fn with_conn<T, F>(pool: DbPool, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut rusqlite::Connection) -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|e| ApiError::InternalServerError(format!("db connection failed: {}", e)))?;
        f(&mut conn)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))?
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard_stats", get(api_stats::dashboard_stats_handler))
        .route(
            "/api/recent_detections",
            get(api_detections::recent_detections_handler),
        )
        .route(
            "/api/worker_compliance",
            get(api_stats::worker_compliance_handler),
        )
        .route(
            "/api/compliance_trends",
            get(api_stats::compliance_trends_handler),
        )
        .route("/api/alerts", get(api_alerts::list_alerts_handler))
        .route(
            "/api/resolve_alert/{id}",
            post(api_alerts::resolve_alert_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
