//! Repository for the `positions` table.

use sedes_core::position::{color_for_service, DEFAULT_COLOR};
use sedes_core::types::DbId;
use sqlx::PgPool;

use crate::models::position::{CreatePosition, Position};

const COLUMNS: &str = "id, site_id, service_id, name, floor, x, y, grid_row, grid_column, \
     description, status, color, created_at, updated_at";

/// Provides create/read operations for positions.
pub struct PositionRepo;

impl PositionRepo {
    /// Insert a new position. Its color is derived from the linked service.
    ///
    /// Callers validate floor, status and grid cell beforehand.
    pub async fn create(pool: &PgPool, input: &CreatePosition) -> Result<Position, sqlx::Error> {
        let color = Self::color_for(pool, input.service_id).await?;
        let query = format!(
            "INSERT INTO positions
                (site_id, service_id, name, floor, x, y, grid_row, grid_column, description, status, color)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 'disponible'), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Position>(&query)
            .bind(input.site_id)
            .bind(input.service_id)
            .bind(input.name.trim())
            .bind(&input.floor)
            .bind(input.x)
            .bind(input.y)
            .bind(input.grid_row)
            .bind(&input.grid_column)
            .bind(&input.description)
            .bind(&input.status)
            .bind(color)
            .fetch_one(pool)
            .await
    }

    /// Find a position by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Position>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM positions WHERE id = $1");
        sqlx::query_as::<_, Position>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Palette color for the service linked to a position.
    async fn color_for(pool: &PgPool, service_id: Option<DbId>) -> Result<&'static str, sqlx::Error> {
        let Some(service_id) = service_id else {
            return Ok(DEFAULT_COLOR);
        };
        let name: Option<String> =
            sqlx::query_scalar("SELECT name FROM services WHERE id = $1")
                .bind(service_id)
                .fetch_optional(pool)
                .await?;
        Ok(color_for_service(name.as_deref()))
    }
}
