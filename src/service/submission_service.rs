//! Submission service: parse, validate, persist.

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;

use crate::domain::ContactRecord;
use crate::error::SubmitError;
use crate::persistence::DetailsStore;

/// Turns a raw request body into a stored record.
///
/// Holds no per-request state. Every call follows the pattern: decode →
/// validate → hand the record to the [`DetailsStore`] → return a single
/// outcome. Nothing touches the store unless validation succeeded.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    store: Arc<dyn DetailsStore>,
}

impl SubmissionService {
    /// Creates a new `SubmissionService` writing to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DetailsStore>) -> Self {
        Self { store }
    }

    /// Processes one submission body and logs its outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitError`] describing why the body was rejected or
    /// why the record could not be stored.
    pub async fn submit(&self, body: &[u8]) -> Result<ContactRecord, SubmitError> {
        tracing::info!(bytes = body.len(), "submission received");
        tracing::debug!(body = %String::from_utf8_lossy(body), "raw request body");

        let outcome = self.process(body).await;
        match &outcome {
            Ok(_) => tracing::info!("record added"),
            Err(e) if e.is_client_error() => tracing::warn!(error = %e, "submission rejected"),
            Err(e) => tracing::error!(error = %e, "submission failed"),
        }
        outcome
    }

    async fn process(&self, body: &[u8]) -> Result<ContactRecord, SubmitError> {
        let value = parse_body(body)?;
        let record = ContactRecord::from_json(&value)?;
        self.persist(record.clone()).await?;
        Ok(record)
    }

    /// Runs the insert on its own task so a panic in the driver becomes
    /// [`SubmitError::Unexpected`] instead of unwinding through the caller.
    async fn persist(&self, record: ContactRecord) -> Result<(), SubmitError> {
        let store = Arc::clone(&self.store);
        let task = tokio::spawn(async move { store.insert(&record).await }.in_current_span());

        match task.await {
            Ok(result) => result.map_err(SubmitError::from),
            Err(join_err) => Err(SubmitError::Unexpected(join_err.to_string())),
        }
    }
}

/// Decodes the body as UTF-8 JSON.
fn parse_body(body: &[u8]) -> Result<Value, SubmitError> {
    let text = std::str::from_utf8(body).map_err(|e| SubmitError::InvalidJson(e.to_string()))?;
    serde_json::from_str(text).map_err(|e| SubmitError::InvalidJson(e.to_string()))
}
