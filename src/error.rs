//! Error types with HTTP status code mapping.
//!
//! [`SubmitError`] is the single outcome type of a submission. Each variant
//! maps to one HTTP status code and a fixed client-facing message; the
//! [`Display`](std::fmt::Display) form carries the full detail and is only
//! ever written to the server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::StoreError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1003,
///     "message": "Name and email are required."
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Everything that can stop a submission short of a stored record.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                            |
/// |-----------|------------|----------------------------------------|
/// | 1000–1999 | Validation | 400 Bad Request, 413 Payload Too Large |
/// | 3000–3999 | Server     | 500 Internal Server Error              |
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Body is not UTF-8 or not parseable JSON.
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// Body parsed, but the top-level value is not an object.
    #[error("expected a json object, got {0}")]
    ExpectedObject(&'static str),

    /// `name` or `email` is absent, empty, or falsy.
    #[error("name and email are required")]
    MissingFields,

    /// `name` or `email` is present but not a string.
    #[error("field {0} must be a string")]
    FieldNotString(&'static str),

    /// Body is larger than the accepted limit, in bytes.
    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// Connecting to, writing to, or committing in the database failed.
    #[error("persistence error: {0}")]
    Persistence(StoreError),

    /// Any other fault raised while persisting.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl SubmitError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidJson(_) => 1001,
            Self::ExpectedObject(_) => 1002,
            Self::MissingFields => 1003,
            Self::FieldNotString(_) => 1004,
            Self::BodyTooLarge(_) => 1005,
            Self::Unexpected(_) => 3000,
            Self::Persistence(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_)
            | Self::ExpectedObject(_)
            | Self::MissingFields
            | Self::FieldNotString(_) => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Persistence(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` for errors caused by the request itself.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// The message sent to the caller. Never includes server-side detail.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "Invalid JSON input. Please provide a valid JSON object.",
            Self::ExpectedObject(_) => "Invalid JSON format. Expected an object.",
            Self::MissingFields => "Name and email are required.",
            Self::FieldNotString(_) => "Name and email must be strings.",
            Self::BodyTooLarge(_) => "Request body is too large.",
            Self::Persistence(_) => "Failed to add record to the database.",
            Self::Unexpected(_) => "An unexpected error occurred.",
        }
    }
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        if err.is_database() {
            Self::Persistence(err)
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message().to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
