//! Movement entity model and DTOs. Movements are append-only.

use sedes_core::movement::MovementDraft;
use sedes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movement {
    pub id: DbId,
    pub device_id: DbId,
    pub responsible_id: Option<DbId>,
    pub origin: String,
    pub destination: String,
    pub observation: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a movement row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovement {
    pub device_id: DbId,
    pub responsible_id: Option<DbId>,
    pub origin: String,
    pub destination: String,
    pub observation: String,
}

impl From<&MovementDraft> for CreateMovement {
    fn from(draft: &MovementDraft) -> Self {
        Self {
            device_id: draft.device_id,
            responsible_id: draft.responsible_id(),
            origin: draft.origin.clone(),
            destination: draft.destination.clone(),
            observation: draft.observation.clone(),
        }
    }
}
