//! Server dependencies (using traits for testability)
//!
//! Built once at process start: store, then the service over it, then the
//! token verifier. Resolvers reach everything through this container.

use std::sync::Arc;

use crate::domains::auth::JwtVerifier;
use crate::domains::books::BookService;
use crate::kernel::BaseBookStore;

/// Server dependencies accessible to resolvers and middleware
#[derive(Clone)]
pub struct ServerDeps {
    pub books: BookService,
    pub jwt_verifier: Arc<JwtVerifier>,
    /// Claim key holding the caller's role array
    pub role_namespace: String,
}

impl ServerDeps {
    pub fn new(
        book_store: Arc<dyn BaseBookStore>,
        jwt_verifier: Arc<JwtVerifier>,
        role_namespace: impl Into<String>,
    ) -> Self {
        Self {
            books: BookService::new(book_store),
            jwt_verifier,
            role_namespace: role_namespace.into(),
        }
    }
}
