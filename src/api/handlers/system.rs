//! System endpoints: readiness of the submission path.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::config::{ConfigError, DatabaseConfig};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    /// `"ok"`, or `"degraded"` when submissions would fail for lack of
    /// database parameters.
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Whether every `POSTGRES_*` connection parameter is set and parses.
    database_configured: bool,
    checked_at: DateTime<Utc>,
}

impl HealthResponse {
    fn from_database_config(config: Result<DatabaseConfig, ConfigError>) -> Self {
        let database_configured = match config {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "database parameters incomplete");
                false
            }
        };
        Self {
            status: if database_configured { "ok" } else { "degraded" },
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database_configured,
            checked_at: Utc::now(),
        }
    }
}

/// `GET /health` — Whether submissions can currently succeed.
///
/// Only checks that the connection parameters are present; it never opens
/// a connection, since connections belong to individual submissions.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Reports service version and whether the POSTGRES_* connection parameters are complete. Does not contact the database.",
    responses(
        (status = 200, description = "Health report", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::from_database_config(
        DatabaseConfig::from_env(),
    ))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
