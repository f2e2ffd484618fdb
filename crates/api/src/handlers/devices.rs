//! Handlers for the `/devices` resource.
//!
//! Writes go through [`DeviceTracker`](sedes_db::tracker::DeviceTracker), so an
//! update that moves a device or changes its fields also records the matching
//! movement and history rows before the response is sent.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sedes_core::error::CoreError;
use sedes_core::types::DbId;
use sedes_db::models::device::{CreateDevice, Device, UpdateDevice};
use sedes_db::models::history::HistoryEntry;
use sedes_db::models::movement::Movement;
use sedes_db::repositories::{DeviceRepo, HistoryRepo, MovementRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/devices
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDevice>,
) -> AppResult<(StatusCode, Json<Device>)> {
    let device = state.tracker().create(&input).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

/// GET /api/v1/devices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Device>> {
    let device = find_device(&state, id).await?;
    Ok(Json(device))
}

/// PUT /api/v1/devices/{id}
///
/// Partial update. An optional `observation` is used as the movement text if
/// the update moves the device.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDevice>,
) -> AppResult<Json<Device>> {
    let device = state.tracker().update(id, &input).await?;
    Ok(Json(device))
}

/// GET /api/v1/devices/{id}/history
pub async fn list_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    find_device(&state, id).await?;
    let entries =
        HistoryRepo::list_for_device(&state.pool, id, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/devices/{id}/movements
pub async fn list_movements(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Movement>>>> {
    find_device(&state, id).await?;
    let movements =
        MovementRepo::list_for_device(&state.pool, id, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: movements }))
}

async fn find_device(state: &AppState, id: DbId) -> AppResult<Device> {
    DeviceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id,
        }))
}
