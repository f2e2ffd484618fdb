use std::sync::Arc;

use sedes_db::tracker::DeviceTracker;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sedes_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Device writes bound to this state's pool and tracking policy.
    pub fn tracker(&self) -> DeviceTracker<'_> {
        DeviceTracker::new(&self.pool, &self.config.tracking)
    }
}
