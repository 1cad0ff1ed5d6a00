//! submit-details server entry point.
//!
//! Hosts the submission handler behind an Axum HTTP server.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use submit_details::api;
use submit_details::app_state::AppState;
use submit_details::config::{LogFormat, ServerConfig};
use submit_details::persistence::{DetailsStore, PostgresDetailsStore};
use submit_details::service::SubmissionService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting submit-details");

    // Database parameters are read per submission, not here
    let store: Arc<dyn DetailsStore> = Arc::new(PostgresDetailsStore::from_env());
    let app_state = AppState {
        submission_service: Arc::new(SubmissionService::new(store)),
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
