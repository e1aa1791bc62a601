//! GraphQL error shaping.
//!
//! Every error a resolver returns carries `extensions.code` so clients can branch
//! without parsing messages.

use juniper::{FieldError, Object, Value};

pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

/// Field error with only a code in its extensions
pub fn coded_error(message: impl std::fmt::Display, code: &str) -> FieldError {
    coded_error_with(message, code, Vec::new())
}

/// Field error with a code plus extra extension entries
pub fn coded_error_with(
    message: impl std::fmt::Display,
    code: &str,
    extra: Vec<(&str, Value)>,
) -> FieldError {
    let mut extensions = Object::with_capacity(extra.len() + 1);
    extensions.add_field("code", Value::scalar(code.to_string()));
    for (key, value) in extra {
        extensions.add_field(key, value);
    }
    FieldError::new(message, Value::Object(extensions))
}
