//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`metrics`]: Prometheus-compatible request metrics.
//!
//! Request tracing uses `tower_http::trace::TraceLayer` directly in the
//! router assembly.

pub mod metrics;
