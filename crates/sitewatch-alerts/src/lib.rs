//! Violation alerting for the SiteWatch platform.
//!
//! Every ingested detection event is evaluated against the required-PPE
//! rules; a failing event produces exactly one alert record. Alerts have a
//! minimal lifecycle: created unresolved, later flipped to resolved by a
//! supervisor. Resolution is idempotent and commutative, so concurrent
//! resolves of the same alert converge without coordination.

mod alert;
mod error;
mod manager;

pub use alert::{ActiveAlert, Alert, AlertPolicy};
pub use error::AlertError;
pub use manager::{evaluate, list_active, resolve, ResolveOutcome};
