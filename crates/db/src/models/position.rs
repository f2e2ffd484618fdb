//! Position (seat/slot) entity model and DTOs.

use sedes_core::movement::PositionRef;
use sedes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `positions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Position {
    pub id: DbId,
    pub site_id: DbId,
    pub service_id: Option<DbId>,
    pub name: String,
    pub floor: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub grid_row: Option<i32>,
    pub grid_column: Option<String>,
    pub description: Option<String>,
    pub status: String,
    /// Derived from the linked service on every write.
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Position {
    /// The subset of the row the movement recorder works with.
    pub fn to_ref(&self) -> PositionRef {
        PositionRef {
            id: self.id,
            name: self.name.clone(),
            site_id: self.site_id,
        }
    }
}

/// DTO for creating a new position.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePosition {
    pub site_id: DbId,
    pub service_id: Option<DbId>,
    pub name: String,
    pub floor: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub grid_row: Option<i32>,
    pub grid_column: Option<String>,
    pub description: Option<String>,
    /// Defaults to `disponible` if omitted.
    pub status: Option<String>,
}
