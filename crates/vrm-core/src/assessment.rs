//! # Assessment Lifecycle States
//!
//! Where a vendor sits in its security assessment cycle. The status is set
//! by whoever manages the assessment calendar — the scorer never derives
//! it, it only consumes the recency of the last completed assessment.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a vendor's security assessment.
///
/// The wire label for [`InProgress`](Self::InProgress) is `"In Progress"`
/// (with a space) — it predates this service and is pinned for
/// compatibility with existing rows and clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentStatus {
    /// Assessment scheduled but not started.
    Pending,
    /// Assessment underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Assessment finished; `last_assessment_date` reflects it.
    Completed,
    /// The next scheduled assessment date has passed without one.
    Overdue,
}

impl AssessmentStatus {
    /// Return all assessment statuses as a slice.
    pub fn all() -> &'static [AssessmentStatus] {
        &[
            Self::Pending,
            Self::InProgress,
            Self::Completed,
            Self::Overdue,
        ]
    }

    /// The total number of assessment statuses.
    pub const COUNT: usize = 4;

    /// Canonical wire label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }

    /// Parse a stored label back into a status.
    ///
    /// Returns `None` for labels outside the closed set.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Pending" => Some(Self::Pending),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_label_keeps_the_space() {
        assert_eq!(AssessmentStatus::InProgress.as_str(), "In Progress");
        assert_eq!(
            serde_json::to_value(AssessmentStatus::InProgress).unwrap(),
            serde_json::json!("In Progress")
        );
        let parsed: AssessmentStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, AssessmentStatus::InProgress);
    }

    #[test]
    fn from_label_roundtrips_and_rejects_unknown() {
        for status in AssessmentStatus::all() {
            assert_eq!(AssessmentStatus::from_label(status.as_str()), Some(*status));
        }
        assert_eq!(AssessmentStatus::from_label("InProgress"), None);
        assert_eq!(AssessmentStatus::from_label("Scheduled"), None);
    }

    #[test]
    fn all_matches_count() {
        assert_eq!(AssessmentStatus::all().len(), AssessmentStatus::COUNT);
    }
}
