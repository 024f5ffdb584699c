//! # Assessment Age Derivation
//!
//! Converts a nullable assessment date into "whole days elapsed, or absent".
//! Absence is a real state ("never assessed"), distinct from zero days —
//! the scorer penalizes it harder than any stale-but-present date.

use chrono::{NaiveDate, Utc};

/// Whole days elapsed from `date` to `as_of`; `None` passes through.
///
/// Calendar-day difference: same-day is 0, yesterday is 1, and a future
/// `date` yields a negative count, passed through as-is for the consumer
/// to sanitize. Dates are typed, so there is no unparseable case here —
/// malformed date strings are rejected where they enter the system.
pub fn days_since_date(date: Option<NaiveDate>, as_of: NaiveDate) -> Option<i64> {
    date.map(|d| (as_of - d).num_days())
}

/// [`days_since_date`] against the current UTC date.
pub fn days_since_today(date: Option<NaiveDate>) -> Option<i64> {
    days_since_date(date, Utc::now().date_naive())
}
