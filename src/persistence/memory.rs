//! In-memory store that records connection lifecycle, for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use super::{DetailsStore, StoreError};
use crate::config::ConfigError;
use crate::domain::ContactRecord;

/// How the fake database misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    /// Connecting fails; no handle is ever opened.
    Connect,
    /// The insert is rejected after the connection is open.
    Insert,
    /// The insert panics while the connection is open.
    Panic,
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryDetailsStore {
    rows: Mutex<Vec<ContactRecord>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    fault: Option<Fault>,
}

/// Fake connection handle; counts itself closed on drop, including during
/// unwinding.
struct Handle<'a>(&'a AtomicUsize);

impl Drop for Handle<'_> {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl InMemoryDetailsStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(fault: Fault) -> Self {
        Self {
            fault: Some(fault),
            ..Self::default()
        }
    }

    pub(crate) fn rows(&self) -> Vec<ContactRecord> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    pub(crate) fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    async fn insert_record(&self, record: &ContactRecord) -> Result<(), StoreError> {
        if self.fault == Some(Fault::Connect) {
            return Err(StoreError::Config(ConfigError::Missing("POSTGRES_HOST")));
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        let _handle = Handle(&self.closed);
        tokio::task::yield_now().await;

        match self.fault {
            Some(Fault::Insert) => Err(StoreError::Database(sqlx::Error::RowNotFound)),
            #[allow(clippy::panic)]
            Some(Fault::Panic) => panic!("driver blew up"),
            _ => {
                if let Ok(mut rows) = self.rows.lock() {
                    rows.push(record.clone());
                }
                Ok(())
            }
        }
    }
}

impl DetailsStore for InMemoryDetailsStore {
    fn insert<'a>(&'a self, record: &'a ContactRecord) -> BoxFuture<'a, Result<(), StoreError>> {
        self.insert_record(record).boxed()
    }
}
