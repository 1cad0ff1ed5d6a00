//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::SubmissionService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Submission service for validation and persistence.
    pub submission_service: Arc<SubmissionService>,
}
