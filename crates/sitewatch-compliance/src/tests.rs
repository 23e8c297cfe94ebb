//! Unit tests for the compliance analyzer.

use crate::analyze;
use sitewatch_types::{ComplianceStatus, PpeFlags, PpeItem};

fn flags(helmet: bool, vest: bool, gloves: bool, goggles: bool, boots: bool, mask: bool) -> PpeFlags {
    PpeFlags {
        helmet,
        vest,
        gloves,
        goggles,
        boots,
        mask,
    }
}

#[test]
fn full_kit_scores_100_and_is_compliant() {
    let verdict = analyze(flags(true, true, true, true, true, true));
    assert_eq!(verdict.compliance_score, 100.0);
    assert_eq!(verdict.status, ComplianceStatus::Compliant);
    assert!(verdict.required_missing.is_empty());
    assert!(verdict.optional_missing.is_empty());
}

#[test]
fn empty_kit_scores_0() {
    let verdict = analyze(PpeFlags::default());
    assert_eq!(verdict.compliance_score, 0.0);
    assert_eq!(verdict.status, ComplianceStatus::NonCompliant);
    assert_eq!(verdict.required_missing, vec!["helmet", "vest", "gloves"]);
    assert_eq!(verdict.optional_missing, vec!["goggles", "boots", "mask"]);
}

#[test]
fn missing_gloves_hits_the_76_7_boundary_exactly() {
    // 70 * (2/3) = 46.666... rounds to 46.7; +30 = 76.7 — below the 80
    // threshold, but the required miss already forces Non-Compliant.
    let verdict = analyze(flags(true, true, false, true, true, true));
    assert_eq!(verdict.required_missing, vec!["gloves"]);
    assert_eq!(verdict.compliance_score, 76.7);
    assert_eq!(verdict.status, ComplianceStatus::NonCompliant);
}

#[test]
fn missing_only_mask_stays_compliant() {
    // Optional items weigh 10 points each: 70 + 20 = 90 >= 80.
    let verdict = analyze(flags(true, true, true, true, true, false));
    assert_eq!(verdict.compliance_score, 90.0);
    assert_eq!(verdict.status, ComplianceStatus::Compliant);
    assert_eq!(verdict.optional_missing, vec!["mask"]);
}

#[test]
fn missing_all_optional_is_partially_compliant() {
    // 70 + 0 = 70 < 80 with no required miss.
    let verdict = analyze(flags(true, true, true, false, false, false));
    assert_eq!(verdict.compliance_score, 70.0);
    assert_eq!(verdict.status, ComplianceStatus::PartiallyCompliant);
}

#[test]
fn any_required_miss_forces_non_compliant() {
    for &missing in PpeItem::REQUIRED.iter() {
        let mut full = flags(true, true, true, true, true, true);
        match missing {
            PpeItem::Helmet => full.helmet = false,
            PpeItem::Vest => full.vest = false,
            PpeItem::Gloves => full.gloves = false,
            _ => unreachable!(),
        }
        let verdict = analyze(full);
        assert_eq!(
            verdict.status,
            ComplianceStatus::NonCompliant,
            "missing {missing} should be Non-Compliant"
        );
        assert_eq!(verdict.required_missing, vec![missing.as_str()]);
    }
}

#[test]
fn score_is_always_in_range_and_status_matches_rule() {
    // Exhaustive over all 64 flag combinations.
    for bits in 0u8..64 {
        let f = flags(
            bits & 1 != 0,
            bits & 2 != 0,
            bits & 4 != 0,
            bits & 8 != 0,
            bits & 16 != 0,
            bits & 32 != 0,
        );
        let verdict = analyze(f);

        assert!(
            (0.0..=100.0).contains(&verdict.compliance_score),
            "score out of range for {f:?}: {}",
            verdict.compliance_score
        );

        let expected = if !verdict.required_missing.is_empty() {
            ComplianceStatus::NonCompliant
        } else if verdict.compliance_score < 80.0 {
            ComplianceStatus::PartiallyCompliant
        } else {
            ComplianceStatus::Compliant
        };
        assert_eq!(verdict.status, expected, "status mismatch for {f:?}");

        // Non-Compliant exactly when a required item is missing.
        assert_eq!(
            verdict.status == ComplianceStatus::NonCompliant,
            !f.all_required_present()
        );
    }
}

#[test]
fn verdicts_serialize_with_dashboard_field_names() {
    let verdict = analyze(flags(true, true, false, false, true, true));
    let json = serde_json::to_value(&verdict).expect("verdict should serialize");

    assert_eq!(json["required_missing"], serde_json::json!(["gloves"]));
    assert_eq!(json["optional_missing"], serde_json::json!(["goggles"]));
    assert_eq!(json["status"], "Non-Compliant");
    // 70 * 2/3 + 30 * 2/3, rounded to one decimal.
    assert_eq!(json["compliance_score"], 66.7);
}
