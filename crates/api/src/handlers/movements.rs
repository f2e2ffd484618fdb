//! Handlers for the `/movements` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sedes_db::models::movement::Movement;
use sedes_db::tracker::RecordMovement;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/movements
///
/// Records a movement between two free-text locations. Origin and destination
/// naming the same location category are rejected with 400 when the
/// location guard is enabled.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RecordMovement>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let movement = state.tracker().record_movement(&input).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}
