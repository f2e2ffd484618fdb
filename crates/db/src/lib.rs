//! PostgreSQL persistence for the device inventory.
//!
//! Repositories are zero-sized structs whose methods take `&PgPool`. The
//! device-update use case, which ties the repositories to the tracking
//! pipeline in `sedes-core`, lives in [`tracker`].

use sqlx::postgres::PgPoolOptions;

pub mod directory;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;
pub mod tracker;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
