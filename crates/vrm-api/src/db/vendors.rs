//! Vendor persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `vendors` table.
//! Row parsing is tolerant: unknown certification labels are skipped and
//! unknown statuses fall back to defaults, each with a warning, so one bad
//! row written by an older build cannot take down hydration or a listing.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use vrm_core::{AssessmentStatus, CertificationKind, RiskLevel};
use vrm_score::{calculate_risk_level, days_since_today, RiskCalculationInput};

use crate::state::VendorRecord;
use crate::summary::VendorSummary;

/// Insert a new vendor record.
pub async fn insert(pool: &PgPool, record: &VendorRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO vendors (id, name, service_type, security_score, compliance_certifications,
         risk_level, last_assessment_date, next_assessment_date, assessment_status,
         contact_email, contract_end_date, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.service_type)
    .bind(record.security_score)
    .bind(certification_labels(record))
    .bind(record.risk_level.as_str())
    .bind(record.last_assessment_date)
    .bind(record.next_assessment_date)
    .bind(record.assessment_status.as_str())
    .bind(&record.contact_email)
    .bind(record.contract_end_date)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Replace all mutable fields of a vendor record.
pub async fn update(pool: &PgPool, record: &VendorRecord) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE vendors SET name = $2, service_type = $3, security_score = $4,
         compliance_certifications = $5, risk_level = $6, last_assessment_date = $7,
         next_assessment_date = $8, assessment_status = $9, contact_email = $10,
         contract_end_date = $11, updated_at = $12
         WHERE id = $1",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.service_type)
    .bind(record.security_score)
    .bind(certification_labels(record))
    .bind(record.risk_level.as_str())
    .bind(record.last_assessment_date)
    .bind(record.next_assessment_date)
    .bind(record.assessment_status.as_str())
    .bind(&record.contact_email)
    .bind(record.contract_end_date)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a vendor record by ID.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Fetch a vendor by ID.
pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<VendorRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, VendorRow>(
        "SELECT id, name, service_type, security_score, compliance_certifications,
         risk_level, last_assessment_date, next_assessment_date, assessment_status,
         contact_email, contract_end_date, created_at, updated_at
         FROM vendors WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(VendorRow::into_record))
}

/// List all vendors in listing order: highest risk severity first, weakest
/// security score first within a severity band.
///
/// Backs startup hydration. The severity ranking is a `CASE` expression —
/// a textual `ORDER BY risk_level DESC` would sort Medium above High — and
/// matches the sort key [`crate::summary::sort_for_listing`] applies to
/// the in-memory store.
pub async fn list_all(pool: &PgPool) -> Result<Vec<VendorRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, VendorRow>(
        "SELECT id, name, service_type, security_score, compliance_certifications,
         risk_level, last_assessment_date, next_assessment_date, assessment_status,
         contact_email, contract_end_date, created_at, updated_at
         FROM vendors
         ORDER BY CASE risk_level WHEN 'High' THEN 0 WHEN 'Medium' THEN 1 ELSE 2 END,
                  security_score ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(VendorRow::into_record).collect())
}

/// Aggregate dashboard statistics in a single query.
///
/// Must stay in lockstep with [`crate::summary::vendor_summary`], which
/// computes the same numbers for in-memory-only deployments.
pub async fn summary(pool: &PgPool) -> Result<VendorSummary, sqlx::Error> {
    let row = sqlx::query_as::<_, SummaryRow>(
        "SELECT
           COUNT(*) AS total_vendors,
           COUNT(*) FILTER (WHERE risk_level = 'High') AS high_risk_count,
           COUNT(*) FILTER (WHERE risk_level = 'Medium') AS medium_risk_count,
           COUNT(*) FILTER (WHERE risk_level = 'Low') AS low_risk_count,
           COUNT(*) FILTER (WHERE assessment_status = 'Pending') AS pending_assessments,
           COUNT(*) FILTER (WHERE assessment_status = 'Overdue') AS overdue_assessments,
           COALESCE(ROUND(AVG(security_score), 1), 0)::float8 AS average_security_score
         FROM vendors",
    )
    .fetch_one(pool)
    .await?;

    Ok(VendorSummary {
        total_vendors: row.total_vendors,
        high_risk_count: row.high_risk_count,
        medium_risk_count: row.medium_risk_count,
        low_risk_count: row.low_risk_count,
        pending_assessments: row.pending_assessments,
        overdue_assessments: row.overdue_assessments,
        average_security_score: row.average_security_score,
    })
}

fn certification_labels(record: &VendorRecord) -> Vec<String> {
    record
        .compliance_certifications
        .iter()
        .map(|c| c.as_str().to_string())
        .collect()
}

fn parse_certifications(id: Uuid, labels: &[String]) -> Vec<CertificationKind> {
    let mut certifications = Vec::with_capacity(labels.len());
    for label in labels {
        match CertificationKind::from_label(label) {
            Some(kind) => certifications.push(kind),
            None => {
                tracing::warn!(
                    vendor = %id,
                    certification = %label,
                    "skipping unknown certification label in database row"
                );
            }
        }
    }
    certifications
}

fn parse_assessment_status(id: Uuid, s: &str) -> AssessmentStatus {
    match AssessmentStatus::from_label(s) {
        Some(status) => status,
        None => {
            tracing::warn!(
                vendor = %id,
                status = s,
                "unknown assessment status in database row, defaulting to Pending"
            );
            AssessmentStatus::Pending
        }
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct VendorRow {
    id: Uuid,
    name: String,
    service_type: String,
    security_score: i32,
    compliance_certifications: Vec<String>,
    risk_level: String,
    last_assessment_date: Option<NaiveDate>,
    next_assessment_date: Option<NaiveDate>,
    assessment_status: String,
    contact_email: String,
    contract_end_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VendorRow {
    fn into_record(self) -> VendorRecord {
        let certifications = parse_certifications(self.id, &self.compliance_certifications);

        // An unrecognized stored level is replaced with a freshly derived
        // one so the record never surfaces with an inconsistent level.
        let risk_level = match RiskLevel::from_label(&self.risk_level) {
            Some(level) => level,
            None => {
                let input = RiskCalculationInput {
                    security_score: self.security_score,
                    compliance_certifications: certifications.clone(),
                    days_since_last_assessment: days_since_today(self.last_assessment_date),
                };
                let derived = calculate_risk_level(&input).risk_level;
                tracing::warn!(
                    vendor = %self.id,
                    stored = %self.risk_level,
                    derived = %derived,
                    "unknown risk level in database row, recomputed from scoring inputs"
                );
                derived
            }
        };

        VendorRecord {
            id: self.id,
            name: self.name,
            service_type: self.service_type,
            security_score: self.security_score,
            compliance_certifications: certifications,
            risk_level,
            last_assessment_date: self.last_assessment_date,
            next_assessment_date: self.next_assessment_date,
            assessment_status: parse_assessment_status(self.id, &self.assessment_status),
            contact_email: self.contact_email,
            contract_end_date: self.contract_end_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Internal row type for the dashboard aggregation query.
#[derive(sqlx::FromRow)]
struct SummaryRow {
    total_vendors: i64,
    high_risk_count: i64,
    medium_risk_count: i64,
    low_risk_count: i64,
    pending_assessments: i64,
    overdue_assessments: i64,
    average_security_score: f64,
}
