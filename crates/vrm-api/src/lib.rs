//! # vrm-api — Axum API Service for the VRM Stack
//!
//! The VRM Stack is the vendor risk management layer: a registry of
//! third-party vendors with deterministic risk scoring, compliance posture
//! evaluation, and portfolio-level dashboard aggregation. Records live in an
//! in-memory store hydrated from Postgres at startup when `DATABASE_URL` is
//! set; without it the service runs in-memory only.
//!
//! ## API Surface
//!
//! | Prefix                   | Module                 | Domain                  |
//! |--------------------------|------------------------|-------------------------|
//! | `/v1/vendors`            | [`routes::vendors`]    | Vendor registry CRUD    |
//! | `/v1/vendors/{id}/risk`  | [`routes::vendors`]    | Risk assessment detail  |
//! | `/v1/dashboard/summary`  | [`routes::dashboard`]  | Portfolio aggregation   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Auto-generated OpenAPI 3.1 spec via utoipa derive macros at `/openapi.json`.

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod summary;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;
use vrm_core::RiskLevel;

/// Check if metrics are enabled via the `VRM_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything other than `"false"`.
fn metrics_enabled() -> bool {
    std::env::var("VRM_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) and `/metrics` are mounted outside the `/v1`
/// surface and skip the request-metrics middleware, so scrapes and probes
/// do not inflate the request counters.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = metrics_enabled();

    // API routes.
    //
    // Body size limit: 2 MiB. This prevents OOM from oversized request bodies.
    // Vendor payloads are small; nothing on this surface needs more.
    let mut api = Router::new()
        .merge(routes::vendors::router())
        .merge(routes::dashboard::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    // Only register the metrics middleware when metrics are enabled.
    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Health probes — readiness checks actual service health.
    let mut probes = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    // Mount /metrics endpoint when metrics are enabled (outside /v1, like health probes).
    if metrics_on {
        probes = probes
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(axum::Extension(metrics));
    }

    let probes = probes.with_state(state);

    Router::new().merge(probes).merge(api)
}

/// GET /metrics — Prometheus metrics scrape endpoint.
///
/// Updates portfolio gauges from current `AppState` on each scrape (pull
/// model), then gathers and encodes all metrics in Prometheus text
/// exposition format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    // -- Update portfolio gauges from AppState --

    let summary = summary::vendor_summary(&state.vendors.list());

    // Reset all risk level labels, then set current values.
    metrics.vendors_total().reset();
    metrics
        .vendors_total()
        .with_label_values(&[RiskLevel::High.as_str()])
        .set(summary.high_risk_count as f64);
    metrics
        .vendors_total()
        .with_label_values(&[RiskLevel::Medium.as_str()])
        .set(summary.medium_risk_count as f64);
    metrics
        .vendors_total()
        .with_label_values(&[RiskLevel::Low.as_str()])
        .set(summary.low_risk_count as f64);

    metrics
        .assessments_pending()
        .set(summary.pending_assessments as f64);
    metrics
        .assessments_overdue()
        .set(summary.overdue_assessments as f64);
    metrics
        .security_score_avg()
        .set(summary.average_security_score);

    // -- Gather and encode --
    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the application is ready to serve traffic.
///
/// Checks:
/// - In-memory vendor store is accessible (read lock acquirable).
/// - Database connection is healthy (when configured).
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    // Verify the store is accessible (read lock acquirable).
    let _ = state.vendors.len();

    // Verify database connection (when configured). A service running
    // in-memory only is still ready — persistence is optional.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}
