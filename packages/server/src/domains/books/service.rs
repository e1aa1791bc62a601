use std::sync::Arc;

use juniper::{FieldError, IntoFieldError, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::common::field_errors::{
    coded_error, coded_error_with, BAD_USER_INPUT, INTERNAL_SERVER_ERROR, NOT_FOUND,
};
use crate::domains::books::data::FieldViolation;
use crate::domains::books::models::{Book, BookChanges, BookId, NewBook};
use crate::kernel::BaseBookStore;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("Book with id {0} not found")]
    NotFound(BookId),

    #[error("Invalid book input")]
    Validation(Vec<FieldViolation>),

    #[error("Book store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl IntoFieldError for BookError {
    fn into_field_error(self) -> FieldError {
        let message = self.to_string();
        match self {
            BookError::NotFound(_) => coded_error(message, NOT_FOUND),
            BookError::Validation(violations) => {
                let fields = violations
                    .iter()
                    .map(|v| {
                        let mut entry = juniper::Object::with_capacity(2);
                        entry.add_field("field", Value::scalar(v.field.to_string()));
                        entry.add_field("message", Value::scalar(v.message.clone()));
                        Value::Object(entry)
                    })
                    .collect();
                let message = violations
                    .iter()
                    .map(|v| v.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                coded_error_with(
                    format!("Invalid book input: {message}"),
                    BAD_USER_INPUT,
                    vec![("fields", Value::list(fields))],
                )
            }
            BookError::Store(err) => {
                error!(error = %err, "book store failure");
                coded_error("Internal server error", INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Book operations over an injected store
#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BaseBookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BaseBookStore>) -> Self {
        Self { store }
    }

    /// Every book, in store order
    pub async fn find_all(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn create(&self, input: NewBook) -> Result<Book, BookError> {
        let book = self.store.insert(input).await?;
        debug!(book_id = %book.id, "book created");
        Ok(book)
    }

    /// Overwrite the fields present in `changes`; a missing book is an error
    pub async fn update(&self, id: BookId, changes: BookChanges) -> Result<Book, BookError> {
        let mut book = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))?;

        if changes.is_empty() {
            return Ok(book);
        }

        book.apply(changes);
        // Deleted between the lookup and the write
        self.store
            .save(book)
            .await?
            .ok_or(BookError::NotFound(id))
    }

    /// Returns false when there was nothing to delete
    pub async fn delete(&self, id: BookId) -> Result<bool, BookError> {
        let removed = self.store.delete(id).await?;
        debug!(book_id = %id, removed, "book delete");
        Ok(removed)
    }
}
