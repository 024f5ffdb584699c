//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI 3.1 spec.
//! Serves at `/openapi.json`. Optionally includes Swagger UI at `/swagger-ui`
//! when the `swagger` feature is enabled.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
///
/// Registers all utoipa-documented routes, schemas, and tags. Serves as the
/// single source of truth for integrators.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VRM API — Vendor Risk Management Stack",
        version = "0.3.7",
        description = "Axum API service for the VRM Stack: vendor registry and third-party risk layer.\n\nProvides:\n- **Vendor registry** CRUD with payload validation and optional Postgres persistence\n- **Risk assessment** — deterministic weighted scoring over security posture, certifications, compliance coverage, and assessment recency\n- **Compliance posture** per vendor against the required certification set (SOC 2, ISO 27001)\n- **Dashboard summary** aggregating risk buckets, assessment backlog, and average security score\n- **Prometheus metrics** for request telemetry and portfolio gauges\n\nVendors live in an in-memory store hydrated from Postgres at startup when `DATABASE_URL` is set; without it the service runs in-memory only. Health probes (`/health/*`) and `/metrics` sit outside the `/v1` surface.",
        license(name = "BUSL-1.1"),
        contact(name = "Meridian GRC", url = "https://meridian-grc.io")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Vendors ──────────────────────────────────────────────────────
        crate::routes::vendors::list_vendors,
        crate::routes::vendors::create_vendor,
        crate::routes::vendors::get_vendor,
        crate::routes::vendors::update_vendor,
        crate::routes::vendors::delete_vendor,
        crate::routes::vendors::vendor_risk,
        // ── Dashboard ────────────────────────────────────────────────────
        crate::routes::dashboard::get_summary,
    ),
    components(
        schemas(
            // ── State record types ──────────────────────────────────────
            crate::state::VendorRecord,
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── Vendor DTOs ─────────────────────────────────────────────
            crate::routes::vendors::VendorPayload,
            crate::routes::vendors::RiskAssessmentResponse,
            // ── Dashboard DTOs ──────────────────────────────────────────
            crate::summary::VendorSummary,
        ),
    ),
    tags(
        (name = "vendors", description = "Vendor registry — CRUD, filtered listing, and per-vendor risk assessment"),
        (name = "dashboard", description = "Portfolio dashboard — aggregate risk and assessment summary"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
