//! Worker reference data.

use serde::{Deserialize, Serialize};

/// A worker known to the monitoring system.
///
/// Workers are reference data: seeded at bootstrap and never mutated by
/// the compliance pipeline. Detection events and alerts reference them
/// by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Database row ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Department the worker belongs to (e.g., "Construction").
    pub department: String,
    /// Job position (e.g., "Foreman").
    pub position: String,
}
