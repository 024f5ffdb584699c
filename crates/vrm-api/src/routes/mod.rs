//! # API Route Modules
//!
//! Route modules for the VRM Stack API surface:
//!
//! - `vendors` — Vendor registry CRUD, listing with search and risk filters,
//!   and the per-vendor risk assessment detail endpoint.
//! - `dashboard` — Registry-wide summary statistics for the risk dashboard.

pub mod dashboard;
pub mod vendors;
