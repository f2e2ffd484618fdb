//! Repository for the `services` table and its `service_sites` links.

use sedes_core::position::color_for_service;
use sedes_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service};

const COLUMNS: &str = "id, name, analytic_code, color, created_at, updated_at";

/// Provides create/read operations for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service and link it to `site_ids` in one transaction. The
    /// color defaults to the palette entry for the service name.
    pub async fn create(
        pool: &PgPool,
        input: &CreateService,
        site_ids: &[DbId],
    ) -> Result<Service, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let name = input.name.trim();
        let color = input
            .color
            .as_deref()
            .unwrap_or_else(|| color_for_service(Some(name)));
        let query = format!(
            "INSERT INTO services (name, analytic_code, color)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let service = sqlx::query_as::<_, Service>(&query)
            .bind(name)
            .bind(&input.analytic_code)
            .bind(color)
            .fetch_one(&mut *tx)
            .await?;

        for &site_id in site_ids {
            sqlx::query(
                "INSERT INTO service_sites (service_id, site_id)
                 VALUES ($1, $2)
                 ON CONFLICT (service_id, site_id) DO NOTHING",
            )
            .bind(service.id)
            .bind(site_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(service)
    }

    /// Find a service by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the services offered at a site, ordered by name.
    pub async fn list_for_site(pool: &PgPool, site_id: DbId) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM services s
             JOIN service_sites ss ON ss.service_id = s.id
             WHERE ss.site_id = $1
             ORDER BY s.name ASC",
            prefixed("s")
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(site_id)
            .fetch_all(pool)
            .await
    }
}

/// `COLUMNS` qualified with a table alias, for joins.
fn prefixed(alias: &str) -> String {
    COLUMNS
        .split(", ")
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
