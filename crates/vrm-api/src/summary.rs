//! # Shared Dashboard Aggregation Logic
//!
//! Pure functions for reducing vendor records to dashboard statistics and
//! for ordering and filtering vendor listings. The dashboard endpoint uses
//! [`vendor_summary`] when running without a database; the SQL aggregation
//! in `db::vendors` must produce the same numbers, and the tests here pin
//! the shared semantics.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vrm_core::{AssessmentStatus, RiskLevel};

use crate::state::VendorRecord;

/// Aggregate statistics across the whole vendor registry.
///
/// Counts are `i64` so the in-memory and SQL (`COUNT(*)`) paths agree on
/// JSON number shape. The average security score is rounded to one decimal
/// place and reported as `0` for an empty registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    pub total_vendors: i64,
    pub high_risk_count: i64,
    pub medium_risk_count: i64,
    pub low_risk_count: i64,
    pub pending_assessments: i64,
    pub overdue_assessments: i64,
    pub average_security_score: f64,
}

/// Reduce vendor records to dashboard statistics.
///
/// Every vendor contributes to exactly one risk bucket, so the three level
/// counts always sum to `total_vendors`.
pub fn vendor_summary(records: &[VendorRecord]) -> VendorSummary {
    let mut summary = VendorSummary {
        total_vendors: records.len() as i64,
        high_risk_count: 0,
        medium_risk_count: 0,
        low_risk_count: 0,
        pending_assessments: 0,
        overdue_assessments: 0,
        average_security_score: 0.0,
    };

    let mut score_sum: i64 = 0;
    for record in records {
        match record.risk_level {
            RiskLevel::High => summary.high_risk_count += 1,
            RiskLevel::Medium => summary.medium_risk_count += 1,
            RiskLevel::Low => summary.low_risk_count += 1,
        }
        match record.assessment_status {
            AssessmentStatus::Pending => summary.pending_assessments += 1,
            AssessmentStatus::Overdue => summary.overdue_assessments += 1,
            _ => {}
        }
        score_sum += i64::from(record.security_score);
    }

    if !records.is_empty() {
        let avg = score_sum as f64 / records.len() as f64;
        summary.average_security_score = (avg * 10.0).round() / 10.0;
    }

    summary
}

/// Order records for the vendor listing: riskiest first, and within a risk
/// level the weakest security score first.
///
/// The sort is stable, so records with identical keys keep their relative
/// order from the input.
pub fn sort_for_listing(records: &mut [VendorRecord]) {
    records.sort_by_key(|r| (Reverse(r.risk_level), r.security_score));
}

/// Case-insensitive substring match against a vendor's name and service type.
pub fn matches_search(record: &VendorRecord, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    record.name.to_lowercase().contains(&needle)
        || record.service_type.to_lowercase().contains(&needle)
}
