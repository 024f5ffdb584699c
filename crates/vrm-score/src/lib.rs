//! # vrm-score — Vendor Risk Scoring Model
//!
//! A pure, synchronous, stateless function library: no I/O, no shared state,
//! no suspension points. Safe to call concurrently from any number of
//! threads; same input always produces the same output.
//!
//! ## Scoring Model
//!
//! For a vendor with security score `s`, certification set `C`, and
//! `days` since the last assessment (absent when never assessed):
//!
//! ```text
//! score = max(0, 100 - s) * 0.4
//!       + (Σ weight of required certs missing from C) * 0.8
//!       + 15   if coverage(C) < 50%
//!       + 20   if days > 365        (else 10 if days > 180)
//!       + 25   if days absent
//!
//! clamped to [0, 100]
//!
//! level: score ≥ 60 → High,  score ≥ 30 → Medium,  else Low
//! ```
//!
//! where `coverage(C)` is the achieved share of the total certification
//! weight defined in `vrm-core`. Each contributing condition appends a
//! human-readable entry to the factor list, in evaluation order.
//!
//! The model is total: out-of-range scores, empty certification sets, and
//! future assessment dates (negative day counts) degrade arithmetic
//! gracefully and never produce an error.

pub mod compliance;
pub mod recency;
pub mod score;

// Re-export primary types.
pub use compliance::{compliance_status, ComplianceStatus};
pub use recency::{days_since_date, days_since_today};
pub use score::{
    achieved_weight, calculate_risk_level, coverage_percent, risk_level_for,
    RiskCalculationInput, RiskCalculationResult, REQUIRED_CERTIFICATIONS,
};
