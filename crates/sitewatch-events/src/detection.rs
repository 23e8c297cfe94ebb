//! Detection event record types.

use serde::{Deserialize, Serialize};
use sitewatch_types::PpeFlags;

/// A detection event about to be ingested.
///
/// Produced by an [`crate::EventSource`] (or a real detector feed) and
/// handed to [`crate::insert_detection`]; immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDetection {
    /// The worker the detector recognised.
    pub worker_id: i64,
    /// Local event time in [`crate::TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Per-item presence flags.
    #[serde(flatten)]
    pub flags: PpeFlags,
    /// Detector confidence in [0, 1].
    pub confidence: f64,
    /// Camera / location label (e.g., "Gate A").
    pub camera_location: String,
}

/// A stored detection event joined with its worker's reference data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionRecord {
    /// Database row ID.
    pub id: i64,
    /// The worker the event belongs to.
    pub worker_id: i64,
    /// Joined worker display name.
    pub worker_name: String,
    /// Joined worker department.
    pub department: String,
    /// Local event time in [`crate::TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Per-item presence flags.
    #[serde(flatten)]
    pub flags: PpeFlags,
    /// Detector confidence in [0, 1].
    pub confidence: f64,
    /// Camera / location label.
    pub camera_location: String,
}
