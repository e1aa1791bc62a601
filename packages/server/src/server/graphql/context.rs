use crate::common::auth::enforce;
use crate::common::{AccessPolicy, AuthError, Authentication};
use crate::domains::auth::IdentityPayload;
use crate::domains::books::BookService;
use crate::kernel::ServerDeps;

/// GraphQL request context
///
/// Shared services plus the caller's authentication for this request
#[derive(Clone)]
pub struct GraphQLContext {
    pub authentication: Authentication,
    pub books: BookService,
    pub role_namespace: String,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: &ServerDeps, authentication: Authentication) -> Self {
        Self {
            authentication,
            books: deps.books.clone(),
            role_namespace: deps.role_namespace.clone(),
        }
    }

    /// Run the access pipeline for `policy` against this request
    pub fn require(&self, policy: AccessPolicy) -> Result<&IdentityPayload, AuthError> {
        enforce(policy, &self.authentication, &self.role_namespace)
    }
}
