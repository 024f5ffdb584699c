//! # Database Persistence Layer
//!
//! Provides Postgres persistence for the vendor registry via SQLx.
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, vendor
//! records are persisted to PostgreSQL and the in-memory store is hydrated
//! from it on startup. When absent, the API operates in in-memory-only mode
//! (suitable for development and testing).
//!
//! Pool sizing follows the `DB_POOL_MIN` / `DB_POOL_MAX` environment
//! variables, defaulting to 2 and 10 connections.

pub mod vendors;

use sqlx::postgres::{PgPool, PgPoolOptions};

fn pool_size_from_env(var: &str, default: u32) -> u32 {
    match std::env::var(var) {
        Ok(raw) => match raw.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(var, value = %raw, "ignoring non-numeric pool size");
                default
            }
        },
        Err(_) => default,
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 Vendors will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .min_connections(pool_size_from_env("DB_POOL_MIN", 2))
        .max_connections(pool_size_from_env("DB_POOL_MAX", 10))
        .idle_timeout(std::time::Duration::from_secs(30))
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    // Run embedded migrations.
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
