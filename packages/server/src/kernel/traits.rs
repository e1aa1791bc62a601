// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "update only the supplied fields") lives in domain services
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseBookStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::books::models::{Book, BookId, NewBook};

// =============================================================================
// Book Store Trait (Infrastructure - persistence)
// =============================================================================

#[async_trait]
pub trait BaseBookStore: Send + Sync {
    /// All books in store-defined order
    async fn find_all(&self) -> Result<Vec<Book>>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    /// Persist a new book and return it with its generated id
    async fn insert(&self, book: NewBook) -> Result<Book>;

    /// Overwrite an existing book; None when its row no longer exists
    async fn save(&self, book: Book) -> Result<Option<Book>>;

    /// Returns true when a row was removed
    async fn delete(&self, id: BookId) -> Result<bool>;
}
