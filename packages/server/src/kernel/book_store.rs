//! SQL-backed book store

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domains::books::models::{Book, BookId, NewBook};
use crate::kernel::BaseBookStore;

/// Book store over the `book` table
#[derive(Clone)]
pub struct SqlBookStore {
    pool: SqlitePool,
}

impl SqlBookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseBookStore for SqlBookStore {
    async fn find_all(&self) -> Result<Vec<Book>> {
        Book::find_all(&self.pool).await
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        Book::find_by_id(id, &self.pool).await
    }

    async fn insert(&self, book: NewBook) -> Result<Book> {
        Book::insert(book, &self.pool).await
    }

    async fn save(&self, book: Book) -> Result<Option<Book>> {
        book.update(&self.pool).await
    }

    async fn delete(&self, id: BookId) -> Result<bool> {
        Book::delete(id, &self.pool).await
    }
}
