use juniper::{GraphQLInputObject, GraphQLObject};
use serde::Serialize;
use std::ops::RangeInclusive;

use crate::domains::books::models::{Book, BookChanges, NewBook};

pub const NAME_LENGTH: RangeInclusive<usize> = 2..=100;
pub const DESCRIPTION_LENGTH: RangeInclusive<usize> = 10..=500;

/// Book as exposed over GraphQL
#[derive(Debug, Clone, PartialEq, Eq, GraphQLObject)]
#[graphql(name = "Book")]
pub struct BookData {
    /// Unique identifier for the book
    pub id: i32,
    /// Name/title of the book
    pub name: String,
    /// Description or summary of the book
    pub description: String,
}

impl From<Book> for BookData {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.get(),
            name: book.name,
            description: book.description,
        }
    }
}

/// Input for creating a book
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct BookInput {
    pub name: String,
    pub description: String,
}

/// Input for updating a book; omitted fields keep their current value
#[derive(Debug, Clone, Default, GraphQLInputObject)]
pub struct UpdateBookInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl BookInput {
    pub fn validate(self) -> Result<NewBook, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        check_field("name", &self.name, NAME_LENGTH, &mut violations);
        check_field("description", &self.description, DESCRIPTION_LENGTH, &mut violations);

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(NewBook {
            name: self.name,
            description: self.description,
        })
    }
}

impl UpdateBookInput {
    /// Each present field is checked on its own
    pub fn validate(self) -> Result<BookChanges, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        if let Some(name) = &self.name {
            check_field("name", name, NAME_LENGTH, &mut violations);
        }
        if let Some(description) = &self.description {
            check_field("description", description, DESCRIPTION_LENGTH, &mut violations);
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(BookChanges {
            name: self.name,
            description: self.description,
        })
    }
}

fn check_field(
    field: &'static str,
    value: &str,
    length: RangeInclusive<usize>,
    violations: &mut Vec<FieldViolation>,
) {
    if value.is_empty() {
        violations.push(FieldViolation {
            field,
            message: format!("{field} should not be empty"),
        });
        return;
    }

    let chars = value.chars().count();
    if chars < *length.start() {
        violations.push(FieldViolation {
            field,
            message: format!(
                "{field} must be longer than or equal to {} characters",
                length.start()
            ),
        });
    } else if chars > *length.end() {
        violations.push(FieldViolation {
            field,
            message: format!(
                "{field} must be shorter than or equal to {} characters",
                length.end()
            ),
        });
    }
}
