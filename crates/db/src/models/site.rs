//! Site entity model and DTOs.

use sedes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Site {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new site.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSite {
    pub name: String,
    pub city: String,
    pub address: String,
}
