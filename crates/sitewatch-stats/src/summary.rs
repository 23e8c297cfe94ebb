//! Aggregate result types served to the dashboard.

use serde::Serialize;

/// Average presence rate per PPE item among today's detections, as
/// percentages rounded to one decimal. All zero when there are no
/// detections today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PpeUsage {
    pub helmet: f64,
    pub vest: f64,
    pub gloves: f64,
    pub goggles: f64,
    pub boots: f64,
    pub mask: f64,
}

/// Site-wide statistics for the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Number of workers known to the system.
    pub total_workers: i64,
    /// Detection events recorded today.
    pub today_detections: i64,
    /// Unresolved alerts, regardless of age.
    pub active_alerts: i64,
    /// Percentage of today's events with helmet, vest, and gloves all
    /// present. Zero when there are no detections today.
    pub overall_compliance: f64,
    /// Per-item average usage among today's events.
    pub avg_ppe_usage: PpeUsage,
}

/// Per-worker compliance summary over all recorded events.
///
/// Every worker appears, including those with zero detections (all rates
/// zero).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerSummary {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub position: String,
    /// Total detection events recorded for this worker.
    pub total_detections: i64,
    /// Helmet presence rate as a percentage.
    pub helmet_rate: f64,
    /// Vest presence rate as a percentage.
    pub vest_rate: f64,
    /// Gloves presence rate as a percentage.
    pub gloves_rate: f64,
    /// Mean of the three required-item rates, as a percentage.
    pub compliance_score: f64,
}

/// One calendar day in the compliance trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTrend {
    /// The day, formatted "YYYY-MM-DD".
    pub date: String,
    /// Percentage of that day's events fully compliant on required PPE.
    /// Zero when the day has no events.
    pub compliance_rate: f64,
    /// Detection events recorded that day.
    pub total_detections: i64,
}
