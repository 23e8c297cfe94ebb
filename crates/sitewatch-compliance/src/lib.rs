//! Compliance analysis for PPE detection events.
//!
//! A verdict is a pure function of an event's presence flags: required
//! items (helmet, vest, gloves) carry 70% of the score, optional items
//! (goggles, boots, mask) the remaining 30%. Verdicts are recomputed on
//! demand and never persisted, so a rule change takes effect immediately
//! for historical events too.

use serde::Serialize;
use sitewatch_types::{ComplianceStatus, PpeFlags, PpeItem};

/// Weight of required PPE in the compliance score.
const REQUIRED_WEIGHT: f64 = 70.0;
/// Weight of optional PPE in the compliance score.
const OPTIONAL_WEIGHT: f64 = 30.0;
/// Scores below this (with all required items present) are Partially Compliant.
const PARTIAL_THRESHOLD: f64 = 80.0;

/// The derived compliance verdict for one detection event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceVerdict {
    /// Keys of required items that were not detected.
    pub required_missing: Vec<&'static str>,
    /// Keys of optional items that were not detected.
    pub optional_missing: Vec<&'static str>,
    /// Weighted presence score in [0, 100], rounded to one decimal.
    pub compliance_score: f64,
    /// Status classification per the scoring rule.
    pub status: ComplianceStatus,
}

/// Analyzes one event's PPE flags and returns its compliance verdict.
///
/// Deterministic and infallible: absent flags are already `false` by the
/// time they reach this function (the flag type defaults missing keys).
pub fn analyze(flags: PpeFlags) -> ComplianceVerdict {
    let required_missing: Vec<&'static str> = PpeItem::REQUIRED
        .iter()
        .filter(|&&item| !flags.get(item))
        .map(|&item| item.as_str())
        .collect();

    let optional_missing: Vec<&'static str> = PpeItem::OPTIONAL
        .iter()
        .filter(|&&item| !flags.get(item))
        .map(|&item| item.as_str())
        .collect();

    let required_fraction =
        1.0 - required_missing.len() as f64 / PpeItem::REQUIRED.len() as f64;
    let optional_fraction =
        1.0 - optional_missing.len() as f64 / PpeItem::OPTIONAL.len() as f64;

    let compliance_score = round1(REQUIRED_WEIGHT * required_fraction + OPTIONAL_WEIGHT * optional_fraction);

    let status = if !required_missing.is_empty() {
        ComplianceStatus::NonCompliant
    } else if compliance_score < PARTIAL_THRESHOLD {
        ComplianceStatus::PartiallyCompliant
    } else {
        ComplianceStatus::Compliant
    };

    ComplianceVerdict {
        required_missing,
        optional_missing,
        compliance_score,
        status,
    }
}

/// Rounds to one decimal place, matching the reported score precision.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests;
