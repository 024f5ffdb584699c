//! # Compliance Status Derivation
//!
//! Reports a vendor's standing against the required certification set and
//! its overall coverage percentage. Display-oriented: the scorer does not
//! consume this, but dashboards render it next to the risk assessment.

use serde::{Deserialize, Serialize};

use vrm_core::CertificationKind;

use crate::score::{achieved_weight, REQUIRED_CERTIFICATIONS};

/// A vendor's standing against the required certifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatus {
    /// Whether the vendor holds SOC2.
    #[serde(rename = "hasSOC2")]
    pub has_soc2: bool,
    /// Whether the vendor holds ISO27001.
    #[serde(rename = "hasISO27001")]
    pub has_iso27001: bool,
    /// Both required certifications present. Optional certifications and
    /// the security score play no part.
    pub is_fully_compliant: bool,
    /// Achieved share of the total certification weight, rounded.
    pub compliance_percentage: u8,
}

/// Derive the compliance status for a certification set.
///
/// Pure and total. The percentage divides by the generically computed
/// total weight, so it stays honest if the weight table is retuned.
pub fn compliance_status(certifications: &[CertificationKind]) -> ComplianceStatus {
    let has_soc2 = certifications.contains(&CertificationKind::Soc2);
    let has_iso27001 = certifications.contains(&CertificationKind::Iso27001);
    let percentage = f64::from(achieved_weight(certifications))
        / f64::from(CertificationKind::total_weight())
        * 100.0;

    ComplianceStatus {
        has_soc2,
        has_iso27001,
        is_fully_compliant: has_soc2 && has_iso27001,
        compliance_percentage: percentage.round() as u8,
    }
}

/// The certifications a fully compliant vendor must hold.
///
/// Re-exported alias of the scorer's required set so display code does not
/// reach into the scoring module for it.
pub const REQUIRED: [CertificationKind; 2] = REQUIRED_CERTIFICATIONS;
