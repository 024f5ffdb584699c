//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! AppState holds the vendor registry and service configuration:
//! - **Vendors** — third-party vendor records with derived risk levels
//! - **Database pool** — optional Postgres persistence behind the in-memory store
//!
//! Risk levels are never accepted from clients. They are derived by
//! `vrm-score` whenever a record is created or its scoring inputs change,
//! so a stored `risk_level` is always consistent with the stored
//! `security_score`, certifications, and assessment date.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;
use vrm_core::{AssessmentStatus, CertificationKind, RiskLevel};
use vrm_score::{days_since_today, RiskCalculationInput};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across an `.await` point.
/// `parking_lot::RwLock` does not poison, so a panicking writer cannot
/// permanently wedge the store.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records in unspecified order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Update a record in place. Returns the updated record, or `None` if not found.
    pub fn update(&self, id: &Uuid, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut guard = self.data.write();
        if let Some(entry) = guard.get_mut(id) {
            f(entry);
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Remove a record by ID, returning it if it existed.
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Vendor Record ------------------------------------------------------------

/// Vendor record (API-layer representation).
///
/// `risk_level` is server-derived and read-only to clients; the create and
/// update payloads deliberately have no risk field. Wire field names are
/// camelCase to match the published API contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub id: Uuid,
    /// Display name of the vendor organization.
    pub name: String,
    /// Category of service supplied (e.g. "Cloud Hosting", "Payroll").
    pub service_type: String,
    /// Self-reported security posture score, 0-100.
    pub security_score: i32,
    /// Certifications the vendor holds. Deduplicated on write.
    #[schema(value_type = Vec<String>)]
    pub compliance_certifications: Vec<CertificationKind>,
    /// Derived risk classification. Kept consistent with the scoring inputs.
    #[schema(value_type = String)]
    pub risk_level: RiskLevel,
    /// Date of the most recent assessment, if one has ever been performed.
    pub last_assessment_date: Option<NaiveDate>,
    /// Scheduled date of the next assessment, if planned.
    pub next_assessment_date: Option<NaiveDate>,
    /// Where the vendor sits in the assessment workflow.
    #[schema(value_type = String)]
    pub assessment_status: AssessmentStatus,
    /// Primary contact address for assessment correspondence.
    pub contact_email: String,
    /// When the current contract expires.
    pub contract_end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VendorRecord {
    /// Build the scoring input for this vendor, with assessment recency
    /// measured against today's date.
    pub fn risk_input(&self) -> RiskCalculationInput {
        RiskCalculationInput {
            security_score: self.security_score,
            compliance_certifications: self.compliance_certifications.clone(),
            days_since_last_assessment: days_since_today(self.last_assessment_date),
        }
    }
}

// -- Application State --------------------------------------------------------

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals in the `Store`. When `db_pool` is
/// `Some`, writes go to both the in-memory store and Postgres; when `None`,
/// the API operates in in-memory-only mode.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The vendor registry.
    pub vendors: Store<VendorRecord>,

    /// PostgreSQL connection pool for durable persistence.
    pub db_pool: Option<PgPool>,

    /// Service configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create a new application state with default configuration and no database.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create a new application state with the given configuration and
    /// optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            vendors: Store::new(),
            db_pool,
            config,
        }
    }

    /// Hydrate the in-memory store from the database.
    ///
    /// Called once on startup when a database pool is available. Loads all
    /// persisted vendors into the in-memory store so that collection reads
    /// stay fast and synchronous.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let vendors = crate::db::vendors::list_all(pool)
            .await
            .map_err(|e| format!("failed to load vendors: {e}"))?;
        let vendor_count = vendors.len();
        for record in vendors {
            self.vendors.insert(record.id, record);
        }

        tracing::info!(vendors = vendor_count, "Hydrated in-memory store from database");

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
