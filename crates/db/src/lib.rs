//! Persistence layer for drafttrack.
//!
//! Provides pool construction, health checks, versioned migrations and the
//! repositories that back every entity endpoint.

pub mod config;
pub mod error;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub use config::{DbConfig, DbConfigError};
pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool and open one connection up front, so an
/// unreachable store fails at startup rather than on the first request.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(config.connect_options()?)
        .await
}

/// Round-trip a trivial query to confirm the store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply every pending migration from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
