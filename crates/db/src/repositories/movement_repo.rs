//! Repository for the append-only `movements` table.

use sedes_core::types::DbId;
use sqlx::PgPool;

use crate::models::movement::{CreateMovement, Movement};

const COLUMNS: &str =
    "id, device_id, responsible_id, origin, destination, observation, created_at";

/// Insert and list movements. There is no update or delete.
pub struct MovementRepo;

impl MovementRepo {
    /// Append a movement, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMovement) -> Result<Movement, sqlx::Error> {
        let query = format!(
            "INSERT INTO movements (device_id, responsible_id, origin, destination, observation)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(input.device_id)
            .bind(input.responsible_id)
            .bind(&input.origin)
            .bind(&input.destination)
            .bind(&input.observation)
            .fetch_one(pool)
            .await
    }

    /// Movements of a device, newest first.
    pub async fn list_for_device(
        pool: &PgPool,
        device_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movements
             WHERE device_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(device_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
