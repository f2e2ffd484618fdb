//! Repository for the `sites` table.

use sedes_core::types::DbId;
use sqlx::PgPool;

use crate::models::site::{CreateSite, Site};

const COLUMNS: &str = "id, name, city, address, created_at, updated_at";

/// Provides create/read operations for sites.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a new site, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSite) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites (name, city, address)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(input.name.trim())
            .bind(&input.city)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    /// Find a site by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites WHERE id = $1");
        sqlx::query_as::<_, Site>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
