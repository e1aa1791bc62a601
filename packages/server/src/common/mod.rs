// Common types and utilities shared across the application

pub mod auth;
pub mod field_errors;

pub use auth::{AccessPolicy, AuthError, Authentication};
pub use field_errors::{coded_error, coded_error_with};
