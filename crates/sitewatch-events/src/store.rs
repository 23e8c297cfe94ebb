//! Persistence operations for detection events.
//!
//! All writes go through [`insert_detection`]; reads join the `workers`
//! table so callers never need a second query for display fields.

use rusqlite::{params, Connection};
use sitewatch_types::PpeFlags;

use crate::detection::{DetectionRecord, NewDetection};
use crate::error::EventError;

/// Inserts one detection event and returns its row ID.
///
/// # Errors
///
/// Returns `EventError::Database` on SQL failure, including a foreign key
/// violation when the worker does not exist.
pub fn insert_detection(conn: &Connection, detection: &NewDetection) -> Result<i64, EventError> {
    conn.execute(
        "INSERT INTO ppe_detections
            (worker_id, timestamp, helmet, vest, gloves, goggles, boots, mask,
             confidence, camera_location)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            detection.worker_id,
            detection.timestamp,
            detection.flags.helmet,
            detection.flags.vest,
            detection.flags.gloves,
            detection.flags.goggles,
            detection.flags.boots,
            detection.flags.mask,
            detection.confidence,
            detection.camera_location,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Returns the most recent detection events, newest first, joined with
/// worker name and department.
///
/// # Errors
///
/// Returns `EventError::Database` on SQL failure.
pub fn recent_detections(conn: &Connection, limit: i64) -> Result<Vec<DetectionRecord>, EventError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.worker_id, w.name, w.department, p.timestamp,
                p.helmet, p.vest, p.gloves, p.goggles, p.boots, p.mask,
                p.confidence, p.camera_location
         FROM ppe_detections p
         JOIN workers w ON p.worker_id = w.id
         ORDER BY p.timestamp DESC, p.id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit], |row| {
        Ok(DetectionRecord {
            id: row.get(0)?,
            worker_id: row.get(1)?,
            worker_name: row.get(2)?,
            department: row.get(3)?,
            timestamp: row.get(4)?,
            flags: PpeFlags {
                helmet: row.get(5)?,
                vest: row.get(6)?,
                gloves: row.get(7)?,
                goggles: row.get(8)?,
                boots: row.get(9)?,
                mask: row.get(10)?,
            },
            confidence: row.get(11)?,
            camera_location: row.get(12)?,
        })
    })?;

    let mut detections = Vec::new();
    for row in rows {
        detections.push(row?);
    }

    Ok(detections)
}

/// Returns the IDs of all known workers, used by event sources to pick a
/// detection subject.
///
/// # Errors
///
/// Returns `EventError::Database` on SQL failure.
pub fn worker_ids(conn: &Connection) -> Result<Vec<i64>, EventError> {
    let mut stmt = conn.prepare("SELECT id FROM workers ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }

    Ok(ids)
}
