// Common test utilities

pub mod graphql;
pub mod harness;

pub use graphql::*;
pub use harness::*;

/// Macro for creating GraphQL variables from a JSON literal
#[macro_export]
macro_rules! vars {
    ($($json:tt)+) => {
        serde_json::from_value::<juniper::Variables>(serde_json::json!($($json)+))
            .expect("variables must be a JSON object")
    };
}
