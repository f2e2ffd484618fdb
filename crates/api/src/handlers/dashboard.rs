use axum::extract::State;
use axum::Json;
use sedes_db::models::dashboard::DeviceSummary;
use sedes_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<DataResponse<DeviceSummary>>> {
    let summary = DashboardRepo::device_summary(&state.pool).await?;
    Ok(Json(DataResponse { data: summary }))
}
