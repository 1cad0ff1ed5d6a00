//! Service layer: business logic between handlers and persistence.

pub mod submission_service;

pub use submission_service::SubmissionService;
