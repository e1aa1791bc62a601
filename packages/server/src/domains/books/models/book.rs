use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;

/// Primary key of the `book` table, generated by the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct BookId(i32);

impl BookId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Book model - persisted row of the `book` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub description: String,
}

/// Input for inserting a new book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub description: String,
}

/// Partial update: present fields overwrite, absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

impl Book {
    /// Apply a partial update in place
    pub fn apply(&mut self, changes: BookChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
    }

    /// Find all books, oldest first
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>> {
        let books = sqlx::query_as::<_, Self>("SELECT id, name, description FROM book ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(books)
    }

    /// Find book by ID, returning None if not found
    pub async fn find_by_id(id: BookId, pool: &SqlitePool) -> Result<Option<Self>> {
        let book = sqlx::query_as::<_, Self>("SELECT id, name, description FROM book WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(book)
    }

    /// Insert a new book, returning it with its generated ID
    pub async fn insert(input: NewBook, pool: &SqlitePool) -> Result<Self> {
        let book = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO book (name, description)
            VALUES (?, ?)
            RETURNING id, name, description
            "#,
        )
        .bind(input.name)
        .bind(input.description)
        .fetch_one(pool)
        .await?;
        Ok(book)
    }

    /// Persist every column of an existing book, None if its row is gone
    pub async fn update(&self, pool: &SqlitePool) -> Result<Option<Self>> {
        let book = sqlx::query_as::<_, Self>(
            r#"
            UPDATE book
            SET name = ?, description = ?
            WHERE id = ?
            RETURNING id, name, description
            "#,
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.id)
        .fetch_optional(pool)
        .await?;
        Ok(book)
    }

    /// Delete a book, returning whether a row was removed
    pub async fn delete(id: BookId, pool: &SqlitePool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
