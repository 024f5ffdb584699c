//! # Risk Levels
//!
//! The three-tier categorical severity assigned to a vendor relationship.
//! The numeric risk score it is derived from lives in `vrm-score`; this
//! module only owns the vocabulary and its ordering.

use serde::{Deserialize, Serialize};

/// Categorical risk severity of a vendor relationship.
///
/// Variants are declared in ascending severity so the derived `Ord` ranks
/// `High` above `Medium` above `Low` — listing sorts and threshold
/// comparisons use that ordering directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Acceptable risk; no heightened review cadence.
    Low,
    /// Elevated risk; worth tracking.
    Medium,
    /// Requires active remediation or contract review.
    High,
}

impl RiskLevel {
    /// Return all risk levels, ascending by severity.
    pub fn all() -> &'static [RiskLevel] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// The total number of risk levels.
    pub const COUNT: usize = 3;

    /// Canonical wire label for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parse a stored label back into a risk level.
    ///
    /// Returns `None` for labels outside the closed set.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
