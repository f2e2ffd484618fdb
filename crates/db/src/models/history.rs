//! History entity model and DTOs. History rows are append-only.

use sedes_core::history::HistoryDraft;
use sedes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub device_id: DbId,
    pub user_id: Option<DbId>,
    /// One of `sedes_core::history::VALID_KINDS`.
    pub kind: String,
    pub description: String,
    /// Field diff (`{field: {before, after}}`) for `field_modified` rows.
    pub changes: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for inserting a history row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHistoryEntry {
    pub device_id: DbId,
    pub user_id: Option<DbId>,
    pub kind: String,
    pub description: String,
    pub changes: Option<serde_json::Value>,
}

impl From<&HistoryDraft> for CreateHistoryEntry {
    fn from(draft: &HistoryDraft) -> Self {
        Self {
            device_id: draft.device_id,
            user_id: draft.user_id,
            kind: draft.kind.as_str().to_string(),
            description: draft.description.clone(),
            changes: draft.changes.clone(),
        }
    }
}
