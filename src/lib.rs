//! # submit-details
//!
//! HTTP function that accepts a JSON body with a `name` and an `email`,
//! checks that both are present, and inserts them as one row into the
//! PostgreSQL `details` table.
//!
//! ## Architecture
//!
//! ```text
//! Client (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SubmissionService (service/)
//!     │       parse → validate (domain/) → persist
//!     │
//!     └── DetailsStore (persistence/)
//!             one PostgreSQL connection per submission
//! ```
//!
//! Every outcome, success or failure, is a single [`error::SubmitError`]
//! or success value mapped to an HTTP response exactly once.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
