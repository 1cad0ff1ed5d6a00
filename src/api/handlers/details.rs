//! Contact submission handler.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::Instrument;

use crate::api::dto::{SubmitDetailsRequest, SubmitDetailsResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, SubmitError};

/// Confirmation returned when the row is committed.
pub const RECORD_ADDED: &str = "Record added successfully.";

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// `POST /details` — Store a name and email.
///
/// # Errors
///
/// Returns [`SubmitError`] on an oversized or malformed body, missing
/// fields, or a database failure.
#[utoipa::path(
    post,
    path = "/api/v1/details",
    tag = "Details",
    summary = "Submit contact details",
    description = "Validates that `name` and `email` are present and non-empty, then inserts them as one row into the `details` table. Submissions are not deduplicated.",
    request_body = SubmitDetailsRequest,
    responses(
        (status = 200, description = "Record added", body = SubmitDetailsResponse),
        (status = 400, description = "Invalid JSON, non-object body, or missing fields", body = ErrorResponse),
        (status = 413, description = "Body larger than 8 MiB", body = ErrorResponse),
        (status = 500, description = "Database or unexpected failure", body = ErrorResponse),
    )
)]
pub async fn submit_details(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, SubmitError> {
    let span = tracing::info_span!("submit_details", request_id = %uuid::Uuid::new_v4());
    let body = body.map_err(|rejection| {
        let err = body_rejection(&rejection);
        tracing::warn!(parent: &span, error = %err, "submission rejected");
        err
    })?;

    state
        .submission_service
        .submit(&body)
        .instrument(span)
        .await?;

    Ok(Json(SubmitDetailsResponse {
        message: RECORD_ADDED.to_string(),
    }))
}

/// Submission routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/details", post(submit_details))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// Maps a failure to buffer the body onto the submission error taxonomy.
fn body_rejection(rejection: &BytesRejection) -> SubmitError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SubmitError::BodyTooLarge(MAX_BODY_BYTES)
    } else {
        SubmitError::InvalidJson(rejection.body_text())
    }
}
