use axum::routing::post;
use axum::Router;

use crate::handlers::movements;
use crate::state::AppState;

/// Movement routes mounted at `/movements`.
///
/// ```text
/// POST /   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(movements::create))
}
