//! PostgreSQL implementation of the persistence layer.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use sqlx::{Connection, PgConnection};

use super::{DetailsStore, StoreError};
use crate::config::DatabaseConfig;
use crate::domain::ContactRecord;

const INSERT_DETAILS: &str = "INSERT INTO details (name, email) VALUES ($1, $2)";

/// Where connection parameters come from.
#[derive(Debug, Clone)]
enum ConfigSource {
    /// Re-read `POSTGRES_*` on every call.
    Environment,
    Fixed(DatabaseConfig),
}

/// PostgreSQL-backed store using one `sqlx::PgConnection` per insert.
///
/// No pool is kept: every call connects, inserts inside a transaction,
/// commits, and closes the connection.
#[derive(Debug, Clone)]
pub struct PostgresDetailsStore {
    source: ConfigSource,
}

impl PostgresDetailsStore {
    /// Creates a store that reads its connection parameters from the
    /// environment at connection time.
    #[must_use]
    pub const fn from_env() -> Self {
        Self {
            source: ConfigSource::Environment,
        }
    }

    /// Creates a store with fixed connection parameters.
    #[must_use]
    pub const fn with_config(config: DatabaseConfig) -> Self {
        Self {
            source: ConfigSource::Fixed(config),
        }
    }

    fn config(&self) -> Result<DatabaseConfig, StoreError> {
        match &self.source {
            ConfigSource::Environment => Ok(DatabaseConfig::from_env()?),
            ConfigSource::Fixed(config) => Ok(config.clone()),
        }
    }

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        let config = self.config()?;
        let options = config.connect_options();
        let conn = tokio::time::timeout(config.connect_timeout, PgConnection::connect_with(&options))
            .await
            .map_err(|_| StoreError::ConnectTimeout(config.connect_timeout))??;
        tracing::debug!(host = %config.host, port = config.port, "database connection opened");
        Ok(conn)
    }

    async fn insert_and_release(&self, record: &ContactRecord) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;

        // The connection is closed here and only here, whatever the insert returned.
        let outcome = insert_record(&mut conn, record).await;
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "database connection did not close cleanly");
        } else {
            tracing::debug!("database connection closed");
        }

        outcome
    }
}

impl DetailsStore for PostgresDetailsStore {
    fn insert<'a>(&'a self, record: &'a ContactRecord) -> BoxFuture<'a, Result<(), StoreError>> {
        self.insert_and_release(record).boxed()
    }
}

/// Runs the insert in a transaction. Dropping an uncommitted transaction
/// rolls it back.
async fn insert_record(conn: &mut PgConnection, record: &ContactRecord) -> Result<(), StoreError> {
    let mut tx = conn.begin().await?;

    let result = sqlx::query(INSERT_DETAILS)
        .bind(record.name())
        .bind(record.email())
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() != 1 {
        return Err(StoreError::UnexpectedRowCount(result.rows_affected()));
    }

    tx.commit().await?;
    Ok(())
}
