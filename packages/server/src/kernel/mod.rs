//! Kernel module - server infrastructure and dependencies.

pub mod book_store;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use book_store::SqlBookStore;
pub use deps::ServerDeps;
pub use test_dependencies::InMemoryBookStore;
#[cfg(any(test, feature = "test-utils"))]
pub use test_dependencies::{TestDependencies, TestTokenIssuer};
pub use traits::*;
