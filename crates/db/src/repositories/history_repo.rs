//! Repository for the append-only `history` table.

use sedes_core::types::DbId;
use sqlx::PgPool;

use crate::models::history::{CreateHistoryEntry, HistoryEntry};

const COLUMNS: &str = "id, device_id, user_id, kind, description, changes, created_at";

/// Insert and list history entries. There is no update or delete.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append a history entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHistoryEntry,
    ) -> Result<HistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO history (device_id, user_id, kind, description, changes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(input.device_id)
            .bind(input.user_id)
            .bind(&input.kind)
            .bind(&input.description)
            .bind(&input.changes)
            .fetch_one(pool)
            .await
    }

    /// History of a device, newest first.
    pub async fn list_for_device(
        pool: &PgPool,
        device_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history
             WHERE device_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(device_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
