use sedes_core::tracking::TrackingPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Movement and history recording policy.
    pub tracking: TrackingPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                 |
    /// |-----------------------------------|-------------------------|
    /// | `HOST`                            | `0.0.0.0`               |
    /// | `PORT`                            | `3000`                  |
    /// | `CORS_ORIGINS`                    | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`            | `30`                    |
    /// | `TRACKING_UNKNOWN_LABEL`          | `Desconocido`           |
    /// | `TRACKING_RECORD_UNASSIGNMENT`    | `true`                  |
    /// | `TRACKING_ENFORCE_LOCATION_GUARD` | `true`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            tracking: tracking_from_env(),
        }
    }
}

fn tracking_from_env() -> TrackingPolicy {
    let defaults = TrackingPolicy::default();

    let unknown_label = std::env::var("TRACKING_UNKNOWN_LABEL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(defaults.unknown_label);

    let record_unassignment = std::env::var("TRACKING_RECORD_UNASSIGNMENT")
        .map(|v| v.parse().expect("TRACKING_RECORD_UNASSIGNMENT must be true or false"))
        .unwrap_or(defaults.record_unassignment);

    let enforce_location_guard = std::env::var("TRACKING_ENFORCE_LOCATION_GUARD")
        .map(|v| {
            v.parse()
                .expect("TRACKING_ENFORCE_LOCATION_GUARD must be true or false")
        })
        .unwrap_or(defaults.enforce_location_guard);

    TrackingPolicy {
        unknown_label,
        record_unassignment,
        enforce_location_guard,
    }
}
