#![deny(missing_docs)]

//! # vrm-core — Domain Vocabulary for the VRM Stack
//!
//! This crate defines the closed enumerated sets that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`
//! from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Closed enums, not open strings.** Certification kinds, risk levels,
//!    and assessment statuses are sum types. The compiler enforces exhaustive
//!    `match` — the weight table cannot silently drift out of sync with the
//!    certification set, and no handler can forget a risk level.
//!
//! 2. **Weights live on the variant.** [`CertificationKind::weight`] is the
//!    single weight table; [`CertificationKind::total_weight`] sums it
//!    generically so coverage math survives a retuned table.
//!
//! 3. **Wire labels are explicit.** Serde renames pin the exact labels the
//!    HTTP API and the database rows use (`"PCI-DSS"`, `"In Progress"`),
//!    and `from_label` gives the read path a non-panicking parse.

pub mod assessment;
pub mod certification;
pub mod risk;

// Re-export primary types at crate root for ergonomic imports.
pub use assessment::AssessmentStatus;
pub use certification::CertificationKind;
pub use risk::RiskLevel;
