//! # Vendor Registry API
//!
//! Handles vendor CRUD, listing with search and risk filters, and the
//! per-vendor risk assessment detail endpoint.
//!
//! The risk level of a record is never taken from the client: both the
//! create and update payloads omit it, and handlers derive it from the
//! submitted scoring inputs before the record is stored.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use vrm_core::{AssessmentStatus, CertificationKind, RiskLevel};
use vrm_score::{
    calculate_risk_level, compliance_status, days_since_today, ComplianceStatus,
    RiskCalculationInput,
};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::{AppState, VendorRecord};
use crate::summary::{matches_search, sort_for_listing};

/// Request body shared by vendor creation and update.
///
/// Note the absence of a risk level field: it is derived server-side.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorPayload {
    pub name: String,
    pub service_type: String,
    /// Security posture score, 0-100.
    pub security_score: i32,
    /// Certification labels; unknown labels are rejected during parsing.
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub compliance_certifications: Vec<CertificationKind>,
    pub last_assessment_date: Option<NaiveDate>,
    pub next_assessment_date: Option<NaiveDate>,
    #[schema(value_type = String)]
    pub assessment_status: AssessmentStatus,
    pub contact_email: String,
    pub contract_end_date: NaiveDate,
}

impl Validate for VendorPayload {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.name.len() > 255 {
            return Err("name must not exceed 255 characters".to_string());
        }
        if self.service_type.trim().is_empty() {
            return Err("serviceType must not be empty".to_string());
        }
        if self.service_type.len() > 255 {
            return Err("serviceType must not exceed 255 characters".to_string());
        }
        if !(0..=100).contains(&self.security_score) {
            return Err("securityScore must be between 0 and 100".to_string());
        }
        if self.contact_email.trim().is_empty() {
            return Err("contactEmail must not be empty".to_string());
        }
        if !self.contact_email.contains('@') {
            return Err("contactEmail must contain '@'".to_string());
        }
        if self.contact_email.len() > 255 {
            return Err("contactEmail must not exceed 255 characters".to_string());
        }
        Ok(())
    }
}

/// Query parameters for the vendor listing.
#[derive(Debug, Deserialize)]
pub struct ListVendorsParams {
    /// Case-insensitive substring filter on name and service type.
    pub search: Option<String>,
    /// Exact risk level filter ("High", "Medium", "Low").
    pub risk_level: Option<String>,
}

/// Risk assessment detail for a single vendor.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentResponse {
    pub vendor_id: Uuid,
    /// Risk classification derived from the current scoring inputs.
    #[schema(value_type = String)]
    pub risk_level: RiskLevel,
    /// Composite risk score, 0-100.
    pub risk_score: u8,
    /// Human-readable factors that contributed to the score.
    pub risk_factors: Vec<String>,
    /// Required-certification and coverage breakdown.
    #[schema(value_type = Object)]
    pub compliance: ComplianceStatus,
    /// Days elapsed since the last assessment, `null` if never assessed.
    pub days_since_last_assessment: Option<i64>,
    pub assessed_at: DateTime<Utc>,
}

/// Build the vendors router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/vendors", get(list_vendors).post(create_vendor))
        .route(
            "/v1/vendors/:id",
            get(get_vendor).put(update_vendor).delete(delete_vendor),
        )
        .route("/v1/vendors/:id/risk", get(vendor_risk))
}

/// Drop repeated certifications, keeping the first occurrence of each.
fn dedup_certifications(certifications: Vec<CertificationKind>) -> Vec<CertificationKind> {
    let mut unique = Vec::with_capacity(certifications.len());
    for cert in certifications {
        if !unique.contains(&cert) {
            unique.push(cert);
        }
    }
    unique
}

/// Fetch a vendor for a point read.
///
/// Prefers the database when a pool is configured so reads observe writes
/// made by other instances; without a pool the in-memory store is
/// authoritative.
async fn fetch_vendor(state: &AppState, id: Uuid) -> Result<VendorRecord, AppError> {
    if let Some(pool) = &state.db_pool {
        return crate::db::vendors::get_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("vendor {id} not found")));
    }
    state
        .vendors
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("vendor {id} not found")))
}

/// GET /v1/vendors — List vendors, riskiest first.
#[utoipa::path(
    get,
    path = "/v1/vendors",
    params(
        ("search" = Option<String>, Query, description = "Substring filter on name and service type"),
        ("risk_level" = Option<String>, Query, description = "Exact risk level filter (High, Medium, Low)"),
    ),
    responses(
        (status = 200, description = "List of vendors", body = Vec<VendorRecord>),
        (status = 422, description = "Unknown risk level filter", body = crate::error::ErrorBody),
    ),
    tag = "vendors"
)]
async fn list_vendors(
    State(state): State<AppState>,
    Query(params): Query<ListVendorsParams>,
) -> Result<Json<Vec<VendorRecord>>, AppError> {
    let level_filter = match &params.risk_level {
        Some(raw) => Some(
            RiskLevel::from_label(raw)
                .ok_or_else(|| AppError::Validation(format!("unknown risk level: {raw}")))?,
        ),
        None => None,
    };

    let mut records = state.vendors.list();
    if let Some(level) = level_filter {
        records.retain(|r| r.risk_level == level);
    }
    if let Some(needle) = &params.search {
        records.retain(|r| matches_search(r, needle));
    }
    sort_for_listing(&mut records);

    Ok(Json(records))
}

/// POST /v1/vendors — Register a vendor.
#[utoipa::path(
    post,
    path = "/v1/vendors",
    request_body = VendorPayload,
    responses(
        (status = 201, description = "Vendor created", body = VendorRecord),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "vendors"
)]
async fn create_vendor(
    State(state): State<AppState>,
    body: Result<Json<VendorPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<VendorRecord>), AppError> {
    let req = extract_validated_json(body)?;
    let now = Utc::now();
    let id = Uuid::new_v4();

    let certifications = dedup_certifications(req.compliance_certifications);
    let input = RiskCalculationInput {
        security_score: req.security_score,
        compliance_certifications: certifications.clone(),
        days_since_last_assessment: days_since_today(req.last_assessment_date),
    };
    let risk_level = calculate_risk_level(&input).risk_level;

    let record = VendorRecord {
        id,
        name: req.name,
        service_type: req.service_type,
        security_score: req.security_score,
        compliance_certifications: certifications,
        risk_level,
        last_assessment_date: req.last_assessment_date,
        next_assessment_date: req.next_assessment_date,
        assessment_status: req.assessment_status,
        contact_email: req.contact_email,
        contract_end_date: req.contract_end_date,
        created_at: now,
        updated_at: now,
    };

    state.vendors.insert(id, record.clone());

    // Persist to database (write-through). Failure is surfaced to the client
    // because the in-memory record would be lost on restart.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::vendors::insert(pool, &record).await {
            tracing::error!(vendor_id = %id, error = %e, "failed to persist vendor to database");
            return Err(AppError::Internal(
                "vendor recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    tracing::info!(vendor_id = %id, risk_level = %record.risk_level, "vendor created");

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/vendors/:id — Get a vendor.
#[utoipa::path(
    get,
    path = "/v1/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor found", body = VendorRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "vendors"
)]
async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VendorRecord>, AppError> {
    fetch_vendor(&state, id).await.map(Json)
}

/// PUT /v1/vendors/:id — Replace a vendor's mutable fields.
#[utoipa::path(
    put,
    path = "/v1/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    request_body = VendorPayload,
    responses(
        (status = 200, description = "Vendor updated", body = VendorRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "vendors"
)]
async fn update_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<VendorPayload>, JsonRejection>,
) -> Result<Json<VendorRecord>, AppError> {
    let req = extract_validated_json(body)?;
    let now = Utc::now();

    let certifications = dedup_certifications(req.compliance_certifications);
    let input = RiskCalculationInput {
        security_score: req.security_score,
        compliance_certifications: certifications.clone(),
        days_since_last_assessment: days_since_today(req.last_assessment_date),
    };
    let risk_level = calculate_risk_level(&input).risk_level;

    let updated = state
        .vendors
        .update(&id, |vendor| {
            vendor.name = req.name.clone();
            vendor.service_type = req.service_type.clone();
            vendor.security_score = req.security_score;
            vendor.compliance_certifications = certifications.clone();
            vendor.risk_level = risk_level;
            vendor.last_assessment_date = req.last_assessment_date;
            vendor.next_assessment_date = req.next_assessment_date;
            vendor.assessment_status = req.assessment_status;
            vendor.contact_email = req.contact_email.clone();
            vendor.contract_end_date = req.contract_end_date;
            vendor.updated_at = now;
        })
        .ok_or_else(|| AppError::NotFound(format!("vendor {id} not found")))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::vendors::update(pool, &updated).await {
            tracing::error!(vendor_id = %id, error = %e, "failed to persist vendor update to database");
            return Err(AppError::Internal(
                "vendor updated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(updated))
}

/// DELETE /v1/vendors/:id — Remove a vendor.
#[utoipa::path(
    delete,
    path = "/v1/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 204, description = "Vendor deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "vendors"
)]
async fn delete_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .vendors
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("vendor {id} not found")))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::vendors::delete(pool, id).await {
            tracing::error!(vendor_id = %id, error = %e, "failed to delete vendor from database");
            return Err(AppError::Internal(
                "vendor removed from memory but database delete failed".to_string(),
            ));
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/vendors/:id/risk — Risk assessment detail.
///
/// Recomputes the assessment from the vendor's current inputs at request
/// time, so the recency factors reflect today rather than the last write.
/// The stored record is not modified.
#[utoipa::path(
    get,
    path = "/v1/vendors/{id}/risk",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Risk assessment", body = RiskAssessmentResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "vendors"
)]
async fn vendor_risk(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RiskAssessmentResponse>, AppError> {
    let vendor = fetch_vendor(&state, id).await?;

    let input = vendor.risk_input();
    let result = calculate_risk_level(&input);
    let compliance = compliance_status(&vendor.compliance_certifications);

    Ok(Json(RiskAssessmentResponse {
        vendor_id: vendor.id,
        risk_level: result.risk_level,
        risk_score: result.risk_score,
        risk_factors: result.risk_factors,
        compliance,
        days_since_last_assessment: input.days_since_last_assessment,
        assessed_at: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> VendorPayload {
        VendorPayload {
            name: "Acme Data Services".to_string(),
            service_type: "Cloud Hosting".to_string(),
            security_score: 85,
            compliance_certifications: vec![CertificationKind::Soc2],
            last_assessment_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            next_assessment_date: None,
            assessment_status: AssessmentStatus::Completed,
            contact_email: "security@acme.example".to_string(),
            contract_end_date: NaiveDate::from_ymd_opt(2027, 3, 31).unwrap(),
        }
    }

    // -- VendorPayload validation ---------------------------------------------

    #[test]
    fn payload_valid() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn payload_empty_name() {
        let mut payload = valid_payload();
        payload.name = "".to_string();
        let err = payload.validate().unwrap_err();
        assert!(err.contains("name"), "error should mention name: {err}");
    }

    #[test]
    fn payload_whitespace_name() {
        let mut payload = valid_payload();
        payload.name = "   ".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_name_too_long() {
        let mut payload = valid_payload();
        payload.name = "x".repeat(256);
        let err = payload.validate().unwrap_err();
        assert!(err.contains("255"), "error should mention limit: {err}");
    }

    #[test]
    fn payload_empty_service_type() {
        let mut payload = valid_payload();
        payload.service_type = " ".to_string();
        let err = payload.validate().unwrap_err();
        assert!(err.contains("serviceType"), "got: {err}");
    }

    #[test]
    fn payload_score_above_range() {
        let mut payload = valid_payload();
        payload.security_score = 101;
        let err = payload.validate().unwrap_err();
        assert!(err.contains("securityScore"), "got: {err}");
    }

    #[test]
    fn payload_score_below_range() {
        let mut payload = valid_payload();
        payload.security_score = -1;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_boundary_scores_are_valid() {
        let mut payload = valid_payload();
        payload.security_score = 0;
        assert!(payload.validate().is_ok());
        payload.security_score = 100;
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payload_email_missing_at() {
        let mut payload = valid_payload();
        payload.contact_email = "not-an-email".to_string();
        let err = payload.validate().unwrap_err();
        assert!(err.contains("contactEmail"), "got: {err}");
    }

    #[test]
    fn payload_empty_email() {
        let mut payload = valid_payload();
        payload.contact_email = "".to_string();
        assert!(payload.validate().is_err());
    }

    // -- dedup_certifications -------------------------------------------------

    #[test]
    fn dedup_keeps_first_occurrence() {
        let deduped = dedup_certifications(vec![
            CertificationKind::Soc2,
            CertificationKind::Gdpr,
            CertificationKind::Soc2,
            CertificationKind::Gdpr,
        ]);
        assert_eq!(
            deduped,
            vec![CertificationKind::Soc2, CertificationKind::Gdpr]
        );
    }

    #[test]
    fn dedup_preserves_unique_input() {
        let input = vec![CertificationKind::Hipaa, CertificationKind::PciDss];
        assert_eq!(dedup_certifications(input.clone()), input);
    }

    // -- Handler integration tests --------------------------------------------

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Helper: build the vendors router with a fresh AppState.
    fn test_app() -> Router<()> {
        router().with_state(AppState::new())
    }

    /// Helper: read the response body as bytes and deserialize from JSON.
    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Helper: JSON body for vendor create/update requests.
    fn vendor_body(name: &str, score: i32, certs: &[&str], last: Option<NaiveDate>) -> String {
        serde_json::json!({
            "name": name,
            "serviceType": "Cloud Hosting",
            "securityScore": score,
            "complianceCertifications": certs,
            "lastAssessmentDate": last.map(|d| d.format("%Y-%m-%d").to_string()),
            "nextAssessmentDate": null,
            "assessmentStatus": "Completed",
            "contactEmail": "security@vendor.example",
            "contractEndDate": "2027-03-31"
        })
        .to_string()
    }

    fn days_ago(days: i64) -> NaiveDate {
        Utc::now().date_naive() - chrono::Duration::days(days)
    }

    async fn post_vendor(app: &Router<()>, body: String) -> axum::response::Response {
        let req = Request::builder()
            .method("POST")
            .uri("/v1/vendors")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        app.clone().oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn create_vendor_returns_201_with_derived_low_risk() {
        let app = test_app();
        let resp = post_vendor(
            &app,
            vendor_body("Acme", 95, &["SOC2", "ISO27001"], Some(days_ago(30))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let record: VendorRecord = body_json(resp).await;
        assert_eq!(record.name, "Acme");
        assert_eq!(record.risk_level, RiskLevel::Low);
        assert_eq!(record.compliance_certifications.len(), 2);
    }

    #[tokio::test]
    async fn create_vendor_derives_high_risk_for_weak_posture() {
        let app = test_app();
        let resp = post_vendor(&app, vendor_body("Shaky LLC", 20, &[], None)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let record: VendorRecord = body_json(resp).await;
        assert_eq!(record.risk_level, RiskLevel::High);
    }

    #[tokio::test]
    async fn create_vendor_ignores_client_supplied_risk_level() {
        // A client claiming to be Low risk still gets the derived level.
        let app = test_app();
        let body = serde_json::json!({
            "name": "Optimist Inc",
            "serviceType": "Payroll",
            "securityScore": 20,
            "complianceCertifications": [],
            "lastAssessmentDate": null,
            "nextAssessmentDate": null,
            "assessmentStatus": "Pending",
            "contactEmail": "it@optimist.example",
            "contractEndDate": "2027-03-31",
            "riskLevel": "Low"
        })
        .to_string();
        let resp = post_vendor(&app, body).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let record: VendorRecord = body_json(resp).await;
        assert_eq!(record.risk_level, RiskLevel::High);
    }

    #[tokio::test]
    async fn create_vendor_dedupes_certifications() {
        let app = test_app();
        let resp = post_vendor(
            &app,
            vendor_body("Dup Co", 80, &["SOC2", "SOC2", "GDPR"], Some(days_ago(10))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let record: VendorRecord = body_json(resp).await;
        assert_eq!(
            record.compliance_certifications,
            vec![CertificationKind::Soc2, CertificationKind::Gdpr]
        );
    }

    #[tokio::test]
    async fn create_vendor_rejects_out_of_range_score_with_422() {
        let app = test_app();
        let resp = post_vendor(&app, vendor_body("Acme", 150, &["SOC2"], None)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_vendor_rejects_unknown_certification_with_400() {
        let app = test_app();
        let resp = post_vendor(&app, vendor_body("Acme", 80, &["SOC3"], None)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_vendor_rejects_malformed_json_with_400() {
        let app = test_app();
        let resp = post_vendor(&app, "{not json".to_string()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_vendor_rejects_unparseable_date_with_400() {
        let app = test_app();
        let body = vendor_body("Acme", 80, &["SOC2"], None)
            .replace("\"lastAssessmentDate\":null", "\"lastAssessmentDate\":\"not-a-date\"");
        let resp = post_vendor(&app, body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_vendor_roundtrip() {
        let app = test_app();
        let resp = post_vendor(
            &app,
            vendor_body("Acme", 95, &["SOC2", "ISO27001"], Some(days_ago(30))),
        )
        .await;
        let created: VendorRecord = body_json(resp).await;

        let req = Request::builder()
            .uri(format!("/v1/vendors/{}", created.id))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let fetched: VendorRecord = body_json(resp).await;
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Acme");
    }

    #[tokio::test]
    async fn get_vendor_returns_404_for_missing() {
        let app = test_app();
        let req = Request::builder()
            .uri(format!("/v1/vendors/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_vendor_rederives_risk_level() {
        let app = test_app();
        let resp = post_vendor(
            &app,
            vendor_body("Acme", 95, &["SOC2", "ISO27001"], Some(days_ago(30))),
        )
        .await;
        let created: VendorRecord = body_json(resp).await;
        assert_eq!(created.risk_level, RiskLevel::Low);

        let req = Request::builder()
            .method("PUT")
            .uri(format!("/v1/vendors/{}", created.id))
            .header("content-type", "application/json")
            .body(Body::from(vendor_body("Acme", 20, &[], None)))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let updated: VendorRecord = body_json(resp).await;
        assert_eq!(updated.risk_level, RiskLevel::High);
        assert_eq!(updated.security_score, 20);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_vendor_returns_404_for_missing() {
        let app = test_app();
        let req = Request::builder()
            .method("PUT")
            .uri(format!("/v1/vendors/{}", Uuid::new_v4()))
            .header("content-type", "application/json")
            .body(Body::from(vendor_body("Acme", 80, &["SOC2"], None)))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_vendor_returns_204_then_404() {
        let app = test_app();
        let resp = post_vendor(&app, vendor_body("Doomed", 80, &["SOC2"], None)).await;
        let created: VendorRecord = body_json(resp).await;

        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/v1/vendors/{}", created.id))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = Request::builder()
            .uri(format!("/v1/vendors/{}", created.id))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_vendors_sorted_riskiest_first() {
        let app = test_app();
        // Low: strong posture. High: weak posture. Medium: middling.
        post_vendor(
            &app,
            vendor_body("LowCo", 95, &["SOC2", "ISO27001"], Some(days_ago(30))),
        )
        .await;
        post_vendor(&app, vendor_body("HighCo", 20, &[], None)).await;
        post_vendor(
            &app,
            vendor_body("MediumCo", 60, &["SOC2", "ISO27001"], None),
        )
        .await;

        let req = Request::builder()
            .uri("/v1/vendors")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let records: Vec<VendorRecord> = body_json(resp).await;
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["HighCo", "MediumCo", "LowCo"]);
    }

    #[tokio::test]
    async fn list_vendors_search_filters_by_name() {
        let app = test_app();
        post_vendor(&app, vendor_body("Acme Hosting", 80, &["SOC2"], None)).await;
        post_vendor(&app, vendor_body("Globex Payroll", 80, &["SOC2"], None)).await;

        let req = Request::builder()
            .uri("/v1/vendors?search=globex")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        let records: Vec<VendorRecord> = body_json(resp).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Globex Payroll");
    }

    #[tokio::test]
    async fn list_vendors_filters_by_risk_level() {
        let app = test_app();
        post_vendor(
            &app,
            vendor_body("LowCo", 95, &["SOC2", "ISO27001"], Some(days_ago(30))),
        )
        .await;
        post_vendor(&app, vendor_body("HighCo", 20, &[], None)).await;

        let req = Request::builder()
            .uri("/v1/vendors?risk_level=High")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        let records: Vec<VendorRecord> = body_json(resp).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "HighCo");
    }

    #[tokio::test]
    async fn list_vendors_unknown_risk_level_returns_422() {
        let app = test_app();
        let req = Request::builder()
            .uri("/v1/vendors?risk_level=Severe")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn risk_endpoint_reports_factors_and_compliance() {
        let app = test_app();
        let resp = post_vendor(&app, vendor_body("Shaky LLC", 40, &["GDPR"], None)).await;
        let created: VendorRecord = body_json(resp).await;

        let req = Request::builder()
            .uri(format!("/v1/vendors/{}/risk", created.id))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let assessment: RiskAssessmentResponse = body_json(resp).await;
        assert_eq!(assessment.vendor_id, created.id);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        // 60*0.4 + 50*0.8 + 15 + 25 = 104, clamped to 100.
        assert_eq!(assessment.risk_score, 100);
        assert!(assessment
            .risk_factors
            .iter()
            .any(|f| f.contains("Security score below 50")));
        assert!(assessment
            .risk_factors
            .iter()
            .any(|f| f.contains("No previous assessment")));
        assert!(!assessment.compliance.has_soc2);
        assert!(!assessment.compliance.has_iso27001);
        assert_eq!(assessment.compliance.compliance_percentage, 15);
        assert_eq!(assessment.days_since_last_assessment, None);
    }

    #[tokio::test]
    async fn risk_endpoint_returns_404_for_missing() {
        let app = test_app();
        let req = Request::builder()
            .uri(format!("/v1/vendors/{}/risk", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
