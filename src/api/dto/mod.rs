//! Data Transfer Objects for REST request/response serialization.

pub mod details_dto;

pub use details_dto::*;
