//! # Compliance Certifications — Single Source of Truth
//!
//! Defines the [`CertificationKind`] enum: the closed set of certifications
//! the scoring model recognizes, each carrying a fixed scoring weight. This
//! is the single definition used by the scorer, the record store, and the
//! API layer — there is no independent label list that can diverge from the
//! weight table.

use serde::{Deserialize, Serialize};

/// A compliance certification a vendor may hold.
///
/// The set is closed and the weights sum to 100 in the current table,
/// but nothing downstream may rely on that sum: coverage math divides by
/// [`total_weight`](Self::total_weight), which is computed over
/// [`all`](Self::all) rather than hard-coded.
///
/// Wire labels (serde and database rows) are the industry spellings,
/// including the hyphen in `PCI-DSS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificationKind {
    /// SOC 2 service organization controls report.
    #[serde(rename = "SOC2")]
    Soc2,
    /// ISO/IEC 27001 information security management certification.
    #[serde(rename = "ISO27001")]
    Iso27001,
    /// EU General Data Protection Regulation compliance.
    #[serde(rename = "GDPR")]
    Gdpr,
    /// US Health Insurance Portability and Accountability Act compliance.
    #[serde(rename = "HIPAA")]
    Hipaa,
    /// Payment Card Industry Data Security Standard certification.
    #[serde(rename = "PCI-DSS")]
    PciDss,
}

impl CertificationKind {
    /// Return all certification kinds as a slice.
    ///
    /// Useful for iteration when the full weight table must be walked
    /// (coverage computation, schema documentation).
    pub fn all() -> &'static [CertificationKind] {
        &[
            Self::Soc2,
            Self::Iso27001,
            Self::Gdpr,
            Self::Hipaa,
            Self::PciDss,
        ]
    }

    /// The total number of certification kinds.
    pub const COUNT: usize = 5;

    /// Fixed scoring weight of this certification.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Soc2 => 25,
            Self::Iso27001 => 25,
            Self::Hipaa => 20,
            Self::Gdpr => 15,
            Self::PciDss => 15,
        }
    }

    /// Sum of the weights of every certification kind.
    ///
    /// Computed generically so a retuned weight table cannot leave a stale
    /// divisor behind in the coverage math.
    pub fn total_weight() -> u32 {
        Self::all().iter().map(|k| k.weight()).sum()
    }

    /// Canonical wire label for this certification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soc2 => "SOC2",
            Self::Iso27001 => "ISO27001",
            Self::Gdpr => "GDPR",
            Self::Hipaa => "HIPAA",
            Self::PciDss => "PCI-DSS",
        }
    }

    /// Parse a stored label back into a certification kind.
    ///
    /// Returns `None` for labels outside the closed set — callers on the
    /// database read path warn and skip rather than fail the whole row.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "SOC2" => Some(Self::Soc2),
            "ISO27001" => Some(Self::Iso27001),
            "GDPR" => Some(Self::Gdpr),
            "HIPAA" => Some(Self::Hipaa),
            "PCI-DSS" => Some(Self::PciDss),
            _ => None,
        }
    }
}

impl std::fmt::Display for CertificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_table_sums_to_one_hundred() {
        assert_eq!(CertificationKind::total_weight(), 100);
    }

    #[test]
    fn all_matches_count() {
        assert_eq!(CertificationKind::all().len(), CertificationKind::COUNT);
    }

    #[test]
    fn individual_weights_match_table() {
        assert_eq!(CertificationKind::Soc2.weight(), 25);
        assert_eq!(CertificationKind::Iso27001.weight(), 25);
        assert_eq!(CertificationKind::Hipaa.weight(), 20);
        assert_eq!(CertificationKind::Gdpr.weight(), 15);
        assert_eq!(CertificationKind::PciDss.weight(), 15);
    }

    #[test]
    fn serde_labels_are_wire_spellings() {
        assert_eq!(
            serde_json::to_value(CertificationKind::Soc2).unwrap(),
            serde_json::json!("SOC2")
        );
        assert_eq!(
            serde_json::to_value(CertificationKind::PciDss).unwrap(),
            serde_json::json!("PCI-DSS")
        );
        let parsed: CertificationKind = serde_json::from_str("\"ISO27001\"").unwrap();
        assert_eq!(parsed, CertificationKind::Iso27001);
    }

    #[test]
    fn serde_rejects_unknown_label() {
        let result: Result<CertificationKind, _> = serde_json::from_str("\"SOC3\"");
        assert!(result.is_err());
    }

    #[test]
    fn from_label_roundtrips_every_kind() {
        for kind in CertificationKind::all() {
            assert_eq!(CertificationKind::from_label(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn from_label_rejects_unknown_and_case_variants() {
        assert_eq!(CertificationKind::from_label("soc2"), None);
        assert_eq!(CertificationKind::from_label("PCIDSS"), None);
        assert_eq!(CertificationKind::from_label(""), None);
    }

    #[test]
    fn display_matches_as_str() {
        for kind in CertificationKind::all() {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
