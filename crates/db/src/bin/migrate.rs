//! Standalone migration runner.
//!
//! Applies every pending versioned migration and exits. The API server never
//! mutates the schema itself; run this before starting it.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drafttrack_db::DbConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drafttrack_db=debug,sqlx=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DbConfig::from_env().expect("Invalid database configuration");
    tracing::info!(db = ?config.target, "Loaded database configuration");

    let pool = drafttrack_db::create_pool(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    drafttrack_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    pool.close().await;
}
