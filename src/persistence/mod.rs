//! Persistence layer: storing contact records in the `details` table.
//!
//! Provides the [`DetailsStore`] trait for durable storage of submissions.
//! The concrete implementation, [`PostgresDetailsStore`], opens one
//! connection per call and releases it before returning.

#[cfg(test)]
pub(crate) mod memory;
pub mod postgres;

use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::config::ConfigError;
use crate::domain::ContactRecord;

pub use postgres::PostgresDetailsStore;

/// Failure while storing a record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection parameters are missing or malformed.
    #[error("database configuration: {0}")]
    Config(#[from] ConfigError),

    /// The server did not accept a connection in time.
    #[error("timed out after {0:?} connecting to database")]
    ConnectTimeout(Duration),

    /// Driver error during connect, insert, or commit.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The insert reported a row count other than one.
    #[error("insert affected {0} rows, expected 1")]
    UnexpectedRowCount(u64),
}

impl StoreError {
    /// Returns `true` for failures of the database layer itself, as
    /// opposed to faults that should never happen.
    #[must_use]
    pub const fn is_database(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::ConnectTimeout(_) | Self::Database(_)
        )
    }
}

/// Durable sink for contact records.
///
/// Each call owns whatever connection it opens and must release it on
/// every exit path, including errors.
pub trait DetailsStore: std::fmt::Debug + Send + Sync {
    /// Inserts exactly one row for `record` and commits it.
    fn insert<'a>(&'a self, record: &'a ContactRecord) -> BoxFuture<'a, Result<(), StoreError>>;
}
