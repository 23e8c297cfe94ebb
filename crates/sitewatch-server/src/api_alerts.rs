//! Alert listing and resolution API handlers.

use crate::{with_conn, ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Serialize;
use sitewatch_alerts::{list_active, resolve, ActiveAlert, ResolveOutcome};
use std::sync::Arc;

/// Response for `POST /api/resolve_alert/{id}`.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// True when the alert exists (including when it was already
    /// resolved); false when the ID is unknown.
    pub success: bool,
}

/// Handler for `GET /api/alerts`.
///
/// Returns all unresolved alerts, newest first.
pub async fn list_alerts_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<ActiveAlert>>, ApiError> {
    let alerts = with_conn(state.pool.clone(), |conn| {
        list_active(conn).map_err(|e| ApiError::InternalServerError(e.to_string()))
    })
    .await?;

    Ok(Json(alerts))
}

/// Handler for `POST /api/resolve_alert/{id}`.
///
/// Resolution is idempotent: a second resolve of the same alert also
/// succeeds. An unknown ID is a `success: false` response, not an HTTP
/// error — a supervisor racing a stale dashboard is routine, not a fault.
pub async fn resolve_alert_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(alert_id): Path<i64>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let outcome = with_conn(state.pool.clone(), move |conn| {
        resolve(conn, alert_id).map_err(|e| ApiError::InternalServerError(e.to_string()))
    })
    .await?;

    Ok(Json(ResolveResponse {
        success: outcome == ResolveOutcome::Resolved,
    }))
}
