//! GraphQL client for integration testing.
//!
//! Executes GraphQL queries directly against the schema without HTTP overhead.

use books_core::common::Authentication;
use books_core::kernel::ServerDeps;
use books_core::server::graphql::{create_schema, GraphQLContext, Schema};
use juniper::Variables;
use serde_json::Value;

/// GraphQL client for executing queries and mutations in tests.
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone)]
pub struct GraphQLErrorInfo {
    pub message: String,
    pub extensions: Value,
}

impl GraphQLErrorInfo {
    pub fn code(&self) -> Option<&str> {
        self.extensions["code"].as_str()
    }
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Value,
    pub errors: Vec<GraphQLErrorInfo>,
}

impl GraphQLResult {
    /// Returns true if the execution had no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data
    }

    /// Code of the single error, panicking unless exactly one was reported.
    pub fn error_code(&self) -> &str {
        assert_eq!(self.errors.len(), 1, "expected one error: {:?}", self.errors);
        self.errors[0].code().expect("error has no code")
    }
}

impl GraphQLClient {
    pub fn new(deps: ServerDeps, authentication: Authentication) -> Self {
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(&deps, authentication),
        }
    }

    /// A caller that sent no Authorization header
    pub fn anonymous(deps: ServerDeps) -> Self {
        Self::new(deps, Authentication::anonymous())
    }

    /// A caller presenting `token`, verified the way the middleware does it
    pub async fn with_token(deps: ServerDeps, token: &str) -> Self {
        let authentication = match deps.jwt_verifier.verify(token).await {
            Ok(identity) => Authentication::Verified(identity),
            Err(err) => Authentication::Unauthenticated(err.to_string()),
        };
        Self::new(deps, authentication)
    }

    /// Execute a GraphQL query/mutation.
    pub async fn execute(&self, query: &str) -> GraphQLResult {
        self.execute_with_vars(query, Variables::new()).await
    }

    /// Execute a GraphQL query/mutation with variables.
    pub async fn execute_with_vars(&self, query: &str, variables: Variables) -> GraphQLResult {
        // Parse and validation failures never reach a resolver
        let (result, errors) =
            match juniper::execute(query, None, &self.schema, &variables, &self.context).await {
                Ok(executed) => executed,
                Err(err) => {
                    return GraphQLResult {
                        data: Value::Null,
                        errors: vec![GraphQLErrorInfo {
                            message: format!("{err:?}"),
                            extensions: Value::Null,
                        }],
                    }
                }
            };

        let data = serde_json::to_value(&result).expect("Failed to serialize GraphQL result");

        let errors = errors
            .iter()
            .map(|e| GraphQLErrorInfo {
                message: e.error().message().to_string(),
                extensions: serde_json::to_value(e.error().extensions())
                    .expect("Failed to serialize error extensions"),
            })
            .collect();

        GraphQLResult { data, errors }
    }

    /// Execute a query and expect success, returning the data.
    pub async fn query(&self, query: &str) -> Value {
        self.execute(query).await.unwrap()
    }

    /// Execute a query with variables and expect success.
    pub async fn query_with_vars(&self, query: &str, variables: Variables) -> Value {
        self.execute_with_vars(query, variables).await.unwrap()
    }
}
