//! Dashboard aggregation API handlers.

use crate::{with_conn, ApiError, AppState};
use axum::{extract::Extension, Json};
use chrono::Local;
use sitewatch_stats::{
    compliance_trends, dashboard_stats, worker_compliance, DashboardStats, DayTrend, WorkerSummary,
};
use std::sync::Arc;

/// Trailing window length for `GET /api/compliance_trends`.
const TREND_WINDOW_DAYS: u32 = 7;

/// Handler for `GET /api/dashboard_stats`.
pub async fn dashboard_stats_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<DashboardStats>, ApiError> {
    let today = Local::now().date_naive();

    let stats = with_conn(state.pool.clone(), move |conn| {
        dashboard_stats(conn, today).map_err(|e| ApiError::InternalServerError(e.to_string()))
    })
    .await?;

    Ok(Json(stats))
}

/// Handler for `GET /api/worker_compliance`.
///
/// Lists every worker, including those without any detections yet.
pub async fn worker_compliance_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<WorkerSummary>>, ApiError> {
    let summaries = with_conn(state.pool.clone(), |conn| {
        worker_compliance(conn).map_err(|e| ApiError::InternalServerError(e.to_string()))
    })
    .await?;

    Ok(Json(summaries))
}

/// Handler for `GET /api/compliance_trends`.
///
/// Returns exactly seven day buckets ending today, oldest first.
pub async fn compliance_trends_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<DayTrend>>, ApiError> {
    let today = Local::now().date_naive();

    let trends = with_conn(state.pool.clone(), move |conn| {
        compliance_trends(conn, today, TREND_WINDOW_DAYS)
            .map_err(|e| ApiError::InternalServerError(e.to_string()))
    })
    .await?;

    Ok(Json(trends))
}
