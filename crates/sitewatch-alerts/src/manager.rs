//! Alert evaluation, listing, and resolution.

use rusqlite::{params, Connection};
use sitewatch_events::NewDetection;
use sitewatch_types::{PpeItem, Severity};

use crate::alert::{ActiveAlert, Alert, AlertPolicy};
use crate::error::AlertError;

/// Outcome of a resolve request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The alert exists and is now resolved (possibly already was).
    Resolved,
    /// No alert with the given ID exists. Not an error.
    NotFound,
}

/// Evaluates a detection event against the required-PPE rules and, when
/// it violates them, persists and returns the resulting alert.
///
/// Returns `Ok(None)` for events with all required items present. The
/// triggering event is expected to be persisted by the caller — alerting
/// does not write to the detections table.
///
/// # Errors
///
/// Returns `AlertError::Database` on SQL failure.
pub fn evaluate(
    conn: &Connection,
    policy: &AlertPolicy,
    detection: &NewDetection,
) -> Result<Option<Alert>, AlertError> {
    let missing: Vec<&'static str> = PpeItem::REQUIRED
        .iter()
        .filter(|&&item| !detection.flags.get(item))
        .map(|&item| item.violation_label())
        .collect();

    if missing.is_empty() {
        return Ok(None);
    }

    if policy.violation_threshold > 1 {
        // Threshold debouncing is a reserved policy knob; until a reset
        // rule is defined, every violating event alerts immediately.
        tracing::debug!(
            threshold = policy.violation_threshold,
            "violation_threshold > 1 is not enforced yet"
        );
    }

    let severity = if !detection.flags.helmet {
        Severity::High
    } else {
        Severity::Medium
    };

    let violation_type = missing.join(", ");
    let description = format!("PPE violation detected at {}", detection.camera_location);

    conn.execute(
        "INSERT INTO alerts (worker_id, timestamp, violation_type, severity, resolved, description)
         VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        params![
            detection.worker_id,
            detection.timestamp,
            violation_type,
            severity.as_str(),
            description,
        ],
    )?;

    let alert = Alert {
        id: conn.last_insert_rowid(),
        worker_id: detection.worker_id,
        timestamp: detection.timestamp.clone(),
        violation_type,
        severity,
        resolved: false,
        description,
    };

    tracing::info!(
        alert_id = alert.id,
        worker_id = alert.worker_id,
        severity = %alert.severity,
        violation = %alert.violation_type,
        "raised PPE violation alert"
    );

    Ok(Some(alert))
}

/// Returns all unresolved alerts, newest first, joined with worker names.
///
/// # Errors
///
/// Returns `AlertError::Database` on SQL failure.
pub fn list_active(conn: &Connection) -> Result<Vec<ActiveAlert>, AlertError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, w.name, a.timestamp, a.violation_type, a.severity, a.description
         FROM alerts a
         JOIN workers w ON a.worker_id = w.id
         WHERE a.resolved = 0
         ORDER BY a.timestamp DESC, a.id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        let severity: String = row.get(4)?;
        Ok(ActiveAlert {
            id: row.get(0)?,
            worker_name: row.get(1)?,
            timestamp: row.get(2)?,
            violation_type: row.get(3)?,
            severity: severity.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            description: row.get(5)?,
        })
    })?;

    let mut alerts = Vec::new();
    for row in rows {
        alerts.push(row?);
    }

    Ok(alerts)
}

/// Marks the given alert as resolved.
///
/// Idempotent: resolving an already-resolved alert still reports
/// [`ResolveOutcome::Resolved`]. An unknown ID reports
/// [`ResolveOutcome::NotFound`] instead of failing.
///
/// # Errors
///
/// Returns `AlertError::Database` on SQL failure.
pub fn resolve(conn: &Connection, alert_id: i64) -> Result<ResolveOutcome, AlertError> {
    let affected = conn.execute("UPDATE alerts SET resolved = 1 WHERE id = ?1", [alert_id])?;

    if affected == 0 {
        return Ok(ResolveOutcome::NotFound);
    }

    tracing::info!(alert_id, "alert resolved");
    Ok(ResolveOutcome::Resolved)
}
