//! `GET /health`: liveness, database reachability and the active tracking
//! policy, so operators can tell which recording rules a deployment runs.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub tracking: TrackingSummary,
}

#[derive(Serialize)]
pub struct TrackingSummary {
    pub unknown_label: String,
    pub record_unassignment: bool,
    pub enforce_location_guard: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match sedes_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database unreachable from health check");
            false
        }
    };
    let policy = &state.config.tracking;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        tracking: TrackingSummary {
            unknown_label: policy.unknown_label.clone(),
            record_unassignment: policy.record_unassignment,
            enforce_location_guard: policy.enforce_location_guard,
        },
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
