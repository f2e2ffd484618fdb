//! Read-only aggregate queries for the dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DeviceSummary;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Device totals split by whether a user is assigned.
    pub async fn device_summary(pool: &PgPool) -> Result<DeviceSummary, sqlx::Error> {
        sqlx::query_as::<_, DeviceSummary>(
            "SELECT
                COUNT(*)::BIGINT AS total,
                COUNT(assigned_user_id)::BIGINT AS assigned,
                (COUNT(*) - COUNT(assigned_user_id))::BIGINT AS unassigned
             FROM devices",
        )
        .fetch_one(pool)
        .await
    }
}
