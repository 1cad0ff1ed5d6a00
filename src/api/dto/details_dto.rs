//! Contact submission DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Request body for `POST /details`.
///
/// Documents the expected shape only. The handler reads the raw body so it
/// can tell malformed JSON, a non-object, and missing fields apart.
#[derive(Debug, ToSchema)]
pub struct SubmitDetailsRequest {
    /// Contact name. Must be a non-empty string.
    #[schema(example = "Alice")]
    pub name: String,
    /// Contact email. Must be a non-empty string; syntax is not checked.
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Response body for a stored submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitDetailsResponse {
    /// Confirmation message.
    pub message: String,
}
