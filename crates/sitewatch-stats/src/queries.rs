//! Aggregation queries over the detection and alert tables.

use chrono::{Duration, NaiveDate};
use rusqlite::Connection;

use crate::error::StatsError;
use crate::summary::{DashboardStats, DayTrend, PpeUsage, WorkerSummary};

/// SQL date format used for `DATE(timestamp)` comparisons.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rounds to one decimal place, the precision all dashboard rates use.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Converts an optional presence fraction (0..=1, NULL when no rows) into
/// a percentage rounded to one decimal.
fn rate_pct(fraction: Option<f64>) -> f64 {
    round1(fraction.unwrap_or(0.0) * 100.0)
}

/// Computes the site-wide dashboard statistics for `today`.
///
/// # Errors
///
/// Returns `StatsError::Database` on SQL failure.
pub fn dashboard_stats(conn: &Connection, today: NaiveDate) -> Result<DashboardStats, StatsError> {
    let today_str = today.format(DATE_FORMAT).to_string();

    let total_workers: i64 =
        conn.query_row("SELECT COUNT(*) FROM workers", [], |row| row.get(0))?;

    // One pass over today's events for the count and per-item averages.
    // AVG() returns NULL when there are no rows, which maps to 0.
    let (today_detections, avg): (i64, [Option<f64>; 6]) = conn.query_row(
        "SELECT COUNT(*),
                AVG(helmet), AVG(vest), AVG(gloves), AVG(goggles), AVG(boots), AVG(mask)
         FROM ppe_detections
         WHERE DATE(timestamp) = ?1",
        [&today_str],
        |row| {
            Ok((
                row.get(0)?,
                [
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ],
            ))
        },
    )?;

    let avg_ppe_usage = PpeUsage {
        helmet: rate_pct(avg[0]),
        vest: rate_pct(avg[1]),
        gloves: rate_pct(avg[2]),
        goggles: rate_pct(avg[3]),
        boots: rate_pct(avg[4]),
        mask: rate_pct(avg[5]),
    };

    let active_alerts: i64 = conn.query_row(
        "SELECT COUNT(*) FROM alerts WHERE resolved = 0",
        [],
        |row| row.get(0),
    )?;

    // Fully-compliant fraction among today's events only.
    let compliant_today: i64 = conn.query_row(
        "SELECT COUNT(*) FROM ppe_detections
         WHERE DATE(timestamp) = ?1 AND helmet = 1 AND vest = 1 AND gloves = 1",
        [&today_str],
        |row| row.get(0),
    )?;

    let overall_compliance = if today_detections > 0 {
        round1(compliant_today as f64 / today_detections as f64 * 100.0)
    } else {
        0.0
    };

    Ok(DashboardStats {
        total_workers,
        today_detections,
        active_alerts,
        overall_compliance,
        avg_ppe_usage,
    })
}

/// Computes per-worker required-PPE compliance over all recorded events.
///
/// Workers with no events are included with zero rates (LEFT JOIN).
///
/// # Errors
///
/// Returns `StatsError::Database` on SQL failure.
pub fn worker_compliance(conn: &Connection) -> Result<Vec<WorkerSummary>, StatsError> {
    let mut stmt = conn.prepare(
        "SELECT w.id, w.name, w.department, w.position,
                COUNT(p.id),
                AVG(CASE WHEN p.helmet = 1 THEN 1.0 ELSE 0.0 END),
                AVG(CASE WHEN p.vest = 1 THEN 1.0 ELSE 0.0 END),
                AVG(CASE WHEN p.gloves = 1 THEN 1.0 ELSE 0.0 END)
         FROM workers w
         LEFT JOIN ppe_detections p ON w.id = p.worker_id
         GROUP BY w.id, w.name, w.department, w.position
         ORDER BY w.id",
    )?;

    let rows = stmt.query_map([], |row| {
        let helmet: Option<f64> = row.get(5)?;
        let vest: Option<f64> = row.get(6)?;
        let gloves: Option<f64> = row.get(7)?;

        let mean = (helmet.unwrap_or(0.0) + vest.unwrap_or(0.0) + gloves.unwrap_or(0.0)) / 3.0;

        Ok(WorkerSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            department: row.get(2)?,
            position: row.get(3)?,
            total_detections: row.get(4)?,
            helmet_rate: rate_pct(helmet),
            vest_rate: rate_pct(vest),
            gloves_rate: rate_pct(gloves),
            compliance_score: round1(mean * 100.0),
        })
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries.push(row?);
    }

    Ok(summaries)
}

/// Computes the day-bucketed compliance trend for the `window_days`
/// calendar days ending on `today`, oldest first.
///
/// Always returns exactly `window_days` entries; days without events get
/// zero counts and a zero rate.
///
/// # Errors
///
/// Returns `StatsError::Database` on SQL failure.
pub fn compliance_trends(
    conn: &Connection,
    today: NaiveDate,
    window_days: u32,
) -> Result<Vec<DayTrend>, StatsError> {
    let mut trends = Vec::with_capacity(window_days as usize);

    for offset in (0..i64::from(window_days)).rev() {
        let day = today - Duration::days(offset);
        let day_str = day.format(DATE_FORMAT).to_string();

        let (total, compliant_fraction): (i64, Option<f64>) = conn.query_row(
            "SELECT COUNT(*),
                    AVG(CASE WHEN helmet = 1 AND vest = 1 AND gloves = 1 THEN 1.0 ELSE 0.0 END)
             FROM ppe_detections
             WHERE DATE(timestamp) = ?1",
            [&day_str],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        trends.push(DayTrend {
            date: day_str,
            compliance_rate: if total > 0 {
                rate_pct(compliant_fraction)
            } else {
                0.0
            },
            total_detections: total,
        });
    }

    Ok(trends)
}
