//! Detection-event ingestion for the SiteWatch platform.
//!
//! Defines the detection record types, the store operations over the
//! `ppe_detections` table, and the pluggable [`EventSource`] abstraction
//! that decouples the ingestion pipeline from where events come from. In
//! production the source is a camera detector feed; the bundled
//! [`SyntheticSource`] synthesizes events with realistic violation rates
//! so the dashboard works without hardware attached.

mod detection;
mod error;
mod source;
mod store;

pub use detection::{DetectionRecord, NewDetection};
pub use error::EventError;
pub use source::{EventSource, SyntheticSource, CAMERA_LOCATIONS};
pub use store::{insert_detection, recent_detections, worker_ids};

/// Storage format for event timestamps: naive local time, sortable, and
/// compatible with SQLite's `DATE()` for calendar-day bucketing.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
