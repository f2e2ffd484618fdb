//! Route definitions for devices and their audit trail.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::devices;
use crate::state::AppState;

/// Device routes mounted at `/devices`.
///
/// ```text
/// POST /                  -> create
/// GET  /{id}              -> get_by_id
/// PUT  /{id}              -> update
/// GET  /{id}/history      -> list_history
/// GET  /{id}/movements    -> list_movements
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(devices::create))
        .route("/{id}", get(devices::get_by_id).put(devices::update))
        .route("/{id}/history", get(devices::list_history))
        .route("/{id}/movements", get(devices::list_movements))
}
