pub mod dashboard;
pub mod devices;
pub mod health;
pub mod movements;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /devices                        create
/// /devices/{id}                   get, update
/// /devices/{id}/history           history listing
/// /devices/{id}/movements         movement listing
/// /movements                      record a movement
/// /dashboard                      device counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/devices", devices::router())
        .nest("/movements", movements::router())
        .nest("/dashboard", dashboard::router())
}
