//! # Dashboard API
//!
//! Registry-wide summary statistics: vendor counts per risk level,
//! assessment workflow counts, and the average security score.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::state::AppState;
use crate::summary::{vendor_summary, VendorSummary};

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/dashboard/summary", get(get_summary))
}

/// GET /v1/dashboard/summary — Aggregate registry statistics.
///
/// With a database configured the aggregation runs as a single SQL query;
/// otherwise it reduces the in-memory store. Both paths produce identical
/// numbers for the same records.
#[utoipa::path(
    get,
    path = "/v1/dashboard/summary",
    responses(
        (status = 200, description = "Registry summary", body = VendorSummary),
    ),
    tag = "dashboard"
)]
async fn get_summary(State(state): State<AppState>) -> Result<Json<VendorSummary>, AppError> {
    if let Some(pool) = &state.db_pool {
        let summary = crate::db::vendors::summary(pool).await?;
        return Ok(Json(summary));
    }

    Ok(Json(vendor_summary(&state.vendors.list())))
}
