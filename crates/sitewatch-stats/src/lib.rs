//! Dashboard aggregation for the SiteWatch platform.
//!
//! Three read-only views over the detection and alert tables: site-wide
//! stats for "today", per-worker compliance rates, and a trailing
//! day-bucketed trend series. Nothing here is cached — every call
//! recomputes from current store state, and each call runs against a
//! single borrowed connection so it observes one consistent snapshot.
//!
//! "Today" is always decided by the caller as a [`chrono::NaiveDate`] and
//! compared against `DATE(timestamp)` in SQL, which keeps calendar-day
//! bucketing in one place and lets tests pin a date.

mod error;
mod queries;
mod summary;

pub use error::StatsError;
pub use queries::{compliance_trends, dashboard_stats, worker_compliance};
pub use summary::{DashboardStats, DayTrend, PpeUsage, WorkerSummary};
