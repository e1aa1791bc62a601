// TestDependencies - mock implementations for testing
//
// Provides an in-memory book store and a token issuer whose public key is served
// through a static JWKS, so tests can mint real RS256 tokens without a network.
//
// The token issuer embeds private fixture keys, so it only exists in unit tests
// and when the `test-utils` feature is enabled (integration tests).

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::BaseBookStore;
use crate::domains::books::models::{Book, BookId, NewBook};

// =============================================================================
// In-memory Book Store
// =============================================================================

#[derive(Default)]
struct BookTable {
    last_id: i32,
    rows: BTreeMap<BookId, Book>,
}

/// Book store held in memory; ids start at 1 and are never reused
#[derive(Default)]
pub struct InMemoryBookStore {
    table: Mutex<BookTable>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseBookStore for InMemoryBookStore {
    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.table.lock().unwrap().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self.table.lock().unwrap().rows.get(&id).cloned())
    }

    async fn insert(&self, book: NewBook) -> Result<Book> {
        let mut table = self.table.lock().unwrap();
        table.last_id += 1;
        let book = Book {
            id: BookId::new(table.last_id),
            name: book.name,
            description: book.description,
        };
        table.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn save(&self, book: Book) -> Result<Option<Book>> {
        let mut table = self.table.lock().unwrap();
        Ok(table.rows.get_mut(&book.id).map(|row| {
            *row = book.clone();
            book
        }))
    }

    async fn delete(&self, id: BookId) -> Result<bool> {
        Ok(self.table.lock().unwrap().rows.remove(&id).is_some())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use fixtures::*;

#[cfg(any(test, feature = "test-utils"))]
mod fixtures {
    use jsonwebtoken::jwk::JwkSet;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use super::InMemoryBookStore;
    use crate::config::DEFAULT_ROLE_NAMESPACE;
    use crate::domains::auth::{JwksCache, JwtVerifier};
    use crate::kernel::ServerDeps;

    // =============================================================================
    // Token Issuer
    // =============================================================================

    pub const TEST_KID: &str = "books-test-key";
    pub const TEST_ISSUER: &str = "https://books-test.auth0.com/";
    pub const TEST_AUDIENCE: &str = "https://books-api.test";

    const PRIMARY_KEY_PEM: &[u8] = include_bytes!("../../tests/fixtures/primary_rsa.pem");
    const ROGUE_KEY_PEM: &[u8] = include_bytes!("../../tests/fixtures/rogue_rsa.pem");
    const PRIMARY_JWKS: &str = include_str!("../../tests/fixtures/jwks.json");

    /// Mints RS256 access tokens the way the identity provider would
    pub struct TestTokenIssuer {
        key: EncodingKey,
    }

    impl TestTokenIssuer {
        /// Signs with the key published in the fixture JWKS
        pub fn new() -> Self {
            Self {
                key: EncodingKey::from_rsa_pem(PRIMARY_KEY_PEM).unwrap(),
            }
        }

        /// Signs with an unpublished key under the published kid
        pub fn rogue() -> Self {
            Self {
                key: EncodingKey::from_rsa_pem(ROGUE_KEY_PEM).unwrap(),
            }
        }

        pub fn jwks() -> JwkSet {
            serde_json::from_str(PRIMARY_JWKS).unwrap()
        }

        /// Verifier trusting the fixture JWKS, issuer and audience
        pub fn verifier() -> JwtVerifier {
            JwtVerifier::new(
                Arc::new(JwksCache::from_static(Self::jwks())),
                TEST_ISSUER,
                TEST_AUDIENCE,
            )
        }

        /// Sign arbitrary claims
        pub fn sign(&self, claims: Value) -> String {
            let mut header = Header::new(Algorithm::RS256);
            header.kid = Some(TEST_KID.to_string());
            encode(&header, &claims, &self.key).unwrap()
        }

        /// Valid for an hour, roles under the default namespace
        pub fn token_with_roles(&self, subject: &str, roles: &[&str]) -> String {
            let now = chrono::Utc::now().timestamp();
            self.sign(json!({
                "sub": subject,
                "iss": TEST_ISSUER,
                "aud": TEST_AUDIENCE,
                "iat": now,
                "exp": now + 3600,
                DEFAULT_ROLE_NAMESPACE: roles,
            }))
        }

        pub fn admin_token(&self) -> String {
            self.token_with_roles("auth0|admin", &["admin"])
        }

        pub fn reader_token(&self) -> String {
            self.token_with_roles("auth0|reader", &[])
        }
    }

    impl Default for TestTokenIssuer {
        fn default() -> Self {
            Self::new()
        }
    }

    // =============================================================================
    // TestDependencies
    // =============================================================================

    /// Server dependencies wired to test doubles
    pub struct TestDependencies {
        pub store: Arc<InMemoryBookStore>,
    }

    impl TestDependencies {
        pub fn new() -> Self {
            Self {
                store: Arc::new(InMemoryBookStore::new()),
            }
        }

        pub fn into_server_deps(self) -> ServerDeps {
            ServerDeps::new(
                self.store,
                Arc::new(TestTokenIssuer::verifier()),
                DEFAULT_ROLE_NAMESPACE,
            )
        }
    }

    impl Default for TestDependencies {
        fn default() -> Self {
            Self::new()
        }
    }
}
