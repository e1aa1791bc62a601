use juniper::{FieldError, IntoFieldError};
use thiserror::Error;

use crate::common::field_errors::{coded_error, FORBIDDEN, UNAUTHENTICATED};

/// Access errors raised before any book operation runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Forbidden: admin role required")]
    Forbidden,
}

impl AuthError {
    /// Machine-readable code surfaced in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::AuthenticationRequired => UNAUTHENTICATED,
            AuthError::Forbidden => FORBIDDEN,
        }
    }
}

impl IntoFieldError for AuthError {
    fn into_field_error(self) -> FieldError {
        coded_error(&self, self.code())
    }
}
