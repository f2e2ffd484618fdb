//! Dashboard summary counts.

use serde::Serialize;
use sqlx::FromRow;

/// Device assignment totals.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceSummary {
    pub total: i64,
    pub assigned: i64,
    pub unassigned: i64,
}
