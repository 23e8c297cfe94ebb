//! Shared domain types for the SiteWatch platform.
//!
//! Everything here is a plain value type: PPE item identifiers, detection
//! flag sets, compliance statuses, alert severities, and worker reference
//! data. Persistence and analysis live in the dedicated crates.

mod ppe;
mod worker;

pub use ppe::{
    ComplianceStatus, ParsePpeItemError, ParseSeverityError, ParseStatusError, PpeFlags, PpeItem,
    Severity,
};
pub use worker::Worker;
