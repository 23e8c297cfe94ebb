//! Recent-detections API handler.

use crate::{with_conn, ApiError, AppState};
use axum::{extract::Extension, Json};
use serde::Serialize;
use sitewatch_compliance::ComplianceVerdict;
use sitewatch_events::{recent_detections, DetectionRecord};
use std::sync::Arc;

/// How many events `GET /api/recent_detections` returns at most.
const RECENT_LIMIT: i64 = 20;

/// A stored detection event annotated with its on-demand compliance
/// verdict. Verdicts are never persisted, so what the dashboard sees is
/// always consistent with the current scoring rules.
#[derive(Debug, Serialize)]
pub struct AnnotatedDetection {
    #[serde(flatten)]
    pub detection: DetectionRecord,
    #[serde(flatten)]
    pub compliance: ComplianceVerdict,
}

/// Handler for `GET /api/recent_detections`.
///
/// Returns the 20 most recent events, newest first, each annotated with
/// its compliance verdict.
pub async fn recent_detections_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<AnnotatedDetection>>, ApiError> {
    let records = with_conn(state.pool.clone(), |conn| {
        recent_detections(conn, RECENT_LIMIT)
            .map_err(|e| ApiError::InternalServerError(e.to_string()))
    })
    .await?;

    let annotated = records
        .into_iter()
        .map(|detection| AnnotatedDetection {
            compliance: sitewatch_compliance::analyze(detection.flags),
            detection,
        })
        .collect();

    Ok(Json(annotated))
}
