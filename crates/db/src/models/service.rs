//! Service (business line) entity model and DTOs.

use sedes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    /// Copied onto every device assigned to this service.
    pub analytic_code: Option<String>,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub name: String,
    pub analytic_code: Option<String>,
    /// Defaults to the palette color for `name`.
    pub color: Option<String>,
}
