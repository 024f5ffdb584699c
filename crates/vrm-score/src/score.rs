//! # Risk Score Computation
//!
//! The core scoring function: maps a vendor's raw attributes to a normalized
//! 0–100 risk score, a categorical [`RiskLevel`], and an ordered list of
//! human-readable risk factors.
//!
//! Factor strings are part of the API contract — dashboards and stored
//! reports match on them verbatim, so their wording is pinned here and
//! asserted by the tests.

use serde::{Deserialize, Serialize};

use vrm_core::{CertificationKind, RiskLevel};

// ---------------------------------------------------------------------------
// Model constants
// ---------------------------------------------------------------------------

/// Clamped scores at or above this are High risk.
pub const HIGH_RISK_THRESHOLD: f64 = 60.0;

/// Clamped scores at or above this (and below the High bound) are Medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 30.0;

/// Security scores below this draw the "Critical" factor.
pub const CRITICAL_SECURITY_SCORE: i32 = 50;

/// Security scores below this (but not Critical) draw the "Warning" factor.
pub const WARNING_SECURITY_SCORE: i32 = 70;

/// Multiplier on the security-score shortfall (`100 - score`).
pub const SECURITY_SHORTFALL_WEIGHT: f64 = 0.4;

/// Multiplier on the summed weight of missing required certifications.
pub const MISSING_REQUIRED_WEIGHT: f64 = 0.8;

/// Coverage below this percentage draws the flat coverage penalty.
pub const LOW_COVERAGE_THRESHOLD: f64 = 50.0;

/// Flat penalty for low certification coverage.
pub const LOW_COVERAGE_PENALTY: f64 = 15.0;

/// Assessments older than this many days draw the overdue penalty.
pub const OVERDUE_ASSESSMENT_DAYS: i64 = 365;

/// Flat penalty for an overdue assessment.
pub const OVERDUE_ASSESSMENT_PENALTY: f64 = 20.0;

/// Assessments older than this many days (but not overdue) draw the aging penalty.
pub const AGING_ASSESSMENT_DAYS: i64 = 180;

/// Flat penalty for an aging assessment.
pub const AGING_ASSESSMENT_PENALTY: f64 = 10.0;

/// Flat penalty when no assessment has ever been recorded.
pub const NEVER_ASSESSED_PENALTY: f64 = 25.0;

/// Certifications every vendor is expected to hold, in reporting order.
///
/// The missing-certification factor string lists absentees in this order.
pub const REQUIRED_CERTIFICATIONS: [CertificationKind; 2] =
    [CertificationKind::Soc2, CertificationKind::Iso27001];

// ---------------------------------------------------------------------------
// Input / output value objects
// ---------------------------------------------------------------------------

/// Raw vendor attributes consumed by one scoring call.
///
/// Built fresh from a vendor record per call; has no lifecycle of its own.
/// `security_score` is expected in [0, 100] by the boundary that built the
/// input — the scorer itself never validates, out-of-range values merely
/// skew the arithmetic. The certification list carries set semantics:
/// duplicates are counted once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCalculationInput {
    /// Vendor security posture score, nominally 0–100.
    pub security_score: i32,
    /// Certifications the vendor currently holds.
    pub compliance_certifications: Vec<CertificationKind>,
    /// Whole days since the last completed assessment; `None` = never assessed.
    pub days_since_last_assessment: Option<i64>,
}

/// One scoring outcome: level, normalized score, and the contributing factors.
///
/// `risk_factors` is ordered by evaluation order of the contributing
/// conditions and is empty exactly when nothing flagged — a vendor can
/// still carry a small nonzero score (security shortfall above the warning
/// line) with no factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCalculationResult {
    /// Categorical severity derived from the clamped score.
    pub risk_level: RiskLevel,
    /// Normalized risk score, clamped to [0, 100] and rounded.
    pub risk_score: u8,
    /// Human-readable contributing factors, in evaluation order.
    pub risk_factors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Sum of the weights of the distinct known certifications present.
///
/// Iterates the closed set rather than the input, so duplicates in the
/// input count once.
pub fn achieved_weight(certifications: &[CertificationKind]) -> u32 {
    CertificationKind::all()
        .iter()
        .filter(|kind| certifications.contains(kind))
        .map(|kind| kind.weight())
        .sum()
}

/// Achieved share of the total certification weight, as a percentage.
pub fn coverage_percent(certifications: &[CertificationKind]) -> f64 {
    f64::from(achieved_weight(certifications)) / f64::from(CertificationKind::total_weight())
        * 100.0
}

/// Map a clamped score to its risk level.
///
/// The step function behind the level invariant: ≥ 60 High, ≥ 30 Medium,
/// else Low. Applied to the clamped score *before* rounding — a score of
/// 59.6 reports as Medium even though it rounds to 60.
pub fn risk_level_for(score: f64) -> RiskLevel {
    if score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Compute the risk assessment for one vendor.
///
/// Pure and total: no I/O, no mutation, no error path. Evaluation order is
/// fixed — security shortfall, missing required certifications, coverage,
/// assessment recency — and determines the order of `risk_factors`.
pub fn calculate_risk_level(input: &RiskCalculationInput) -> RiskCalculationResult {
    let mut score = 0.0_f64;
    let mut factors = Vec::new();

    // 1. Security-score shortfall. The contribution accrues for any score
    //    below 100; the factor strings only fire below the branch points.
    //    Widened to i64 so the subtraction stays total across the full i32
    //    range of stored scores.
    let shortfall = (100_i64 - i64::from(input.security_score)).max(0);
    score += shortfall as f64 * SECURITY_SHORTFALL_WEIGHT;
    if input.security_score < CRITICAL_SECURITY_SCORE {
        factors.push("Critical: Security score below 50".to_string());
    } else if input.security_score < WARNING_SECURITY_SCORE {
        factors.push("Warning: Security score below 70".to_string());
    }

    // 2. Missing required certifications, reported in required-set order.
    let missing: Vec<CertificationKind> = REQUIRED_CERTIFICATIONS
        .iter()
        .copied()
        .filter(|required| !input.compliance_certifications.contains(required))
        .collect();
    if !missing.is_empty() {
        let missing_weight: u32 = missing.iter().map(|kind| kind.weight()).sum();
        score += f64::from(missing_weight) * MISSING_REQUIRED_WEIGHT;
        let names: Vec<&str> = missing.iter().map(|kind| kind.as_str()).collect();
        factors.push(format!(
            "Missing required certifications: {}",
            names.join(", ")
        ));
    }

    // 3. Certification coverage.
    if coverage_percent(&input.compliance_certifications) < LOW_COVERAGE_THRESHOLD {
        score += LOW_COVERAGE_PENALTY;
        factors.push("Low compliance coverage (< 50%)".to_string());
    }

    // 4. Assessment recency. Absence is its own flat penalty and is never
    //    evaluated against the day thresholds. Negative day counts (future
    //    dates) fall through as recent.
    match input.days_since_last_assessment {
        Some(days) if days > OVERDUE_ASSESSMENT_DAYS => {
            score += OVERDUE_ASSESSMENT_PENALTY;
            factors.push("Assessment overdue (> 1 year since last assessment)".to_string());
        }
        Some(days) if days > AGING_ASSESSMENT_DAYS => {
            score += AGING_ASSESSMENT_PENALTY;
            factors.push("Assessment aging (> 6 months since last assessment)".to_string());
        }
        Some(_) => {}
        None => {
            score += NEVER_ASSESSED_PENALTY;
            factors.push("No previous assessment on record".to_string());
        }
    }

    // 5. Clamp, derive the level from the clamped score, then round.
    let clamped = score.clamp(0.0, 100.0);
    RiskCalculationResult {
        risk_level: risk_level_for(clamped),
        risk_score: clamped.round() as u8,
        risk_factors: factors,
    }
}
