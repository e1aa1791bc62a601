//! Test harness over an in-memory SQLite database.
//!
//! Each harness gets its own database with migrations applied, so tests never
//! share rows and can run in parallel.

use anyhow::{Context, Result};
use books_core::config::DEFAULT_ROLE_NAMESPACE;
use books_core::kernel::{ServerDeps, SqlBookStore, TestTokenIssuer};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use test_context::AsyncTestContext;

use super::GraphQLClient;

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.admin().await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for direct assertions on stored rows.
    pub db_pool: SqlitePool,
    /// Signs tokens the test verifier accepts
    pub tokens: TestTokenIssuer,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        // Uses try_init() to avoid panicking if already initialized.
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        // One connection: every in-memory connection is its own database
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_pool,
            tokens: TestTokenIssuer::new(),
        })
    }

    /// Production wiring over the test database and fixture JWKS
    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(
            Arc::new(SqlBookStore::new(self.db_pool.clone())),
            Arc::new(TestTokenIssuer::verifier()),
            DEFAULT_ROLE_NAMESPACE,
        )
    }

    /// Client sending no token
    pub fn anonymous(&self) -> GraphQLClient {
        GraphQLClient::anonymous(self.deps())
    }

    /// Client with a valid token and no roles
    pub async fn reader(&self) -> GraphQLClient {
        GraphQLClient::with_token(self.deps(), &self.tokens.reader_token()).await
    }

    /// Client with a valid token carrying the admin role
    pub async fn admin(&self) -> GraphQLClient {
        GraphQLClient::with_token(self.deps(), &self.tokens.admin_token()).await
    }

    /// Row count straight from the table
    pub async fn book_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM book")
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count books")
    }
}
