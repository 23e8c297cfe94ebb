//! Alert record types and the alerting policy.

use serde::{Deserialize, Serialize};
use sitewatch_types::Severity;

/// Tunables for violation alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPolicy {
    /// Number of consecutive violating events before an alert is raised.
    ///
    /// Reserved knob: current evaluation raises an alert on every
    /// violating event regardless of this value. Enforcing a higher
    /// threshold needs a per-worker rolling counter with a defined reset
    /// rule, which is not specified yet.
    #[serde(default = "default_violation_threshold")]
    pub violation_threshold: u32,
}

fn default_violation_threshold() -> u32 {
    1
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            violation_threshold: default_violation_threshold(),
        }
    }
}

/// A stored violation alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// Database row ID.
    pub id: i64,
    /// The worker the violation was observed on.
    pub worker_id: i64,
    /// Timestamp of the triggering detection event.
    pub timestamp: String,
    /// Comma-joined violation labels (e.g., "No Helmet, No Gloves").
    pub violation_type: String,
    /// High when the helmet was missing, Medium otherwise.
    pub severity: Severity,
    /// Whether a supervisor has resolved this alert.
    pub resolved: bool,
    /// Human-readable description, including the camera location.
    pub description: String,
}

/// An unresolved alert joined with its worker's name, as listed on the
/// dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveAlert {
    /// Database row ID.
    pub id: i64,
    /// Joined worker display name.
    pub worker_name: String,
    /// Timestamp of the triggering detection event.
    pub timestamp: String,
    /// Comma-joined violation labels.
    pub violation_type: String,
    /// Alert severity.
    pub severity: Severity,
    /// Human-readable description.
    pub description: String,
}
