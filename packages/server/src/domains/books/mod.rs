pub mod data;
pub mod edges;
pub mod models;
pub mod service;

pub use data::{BookData, BookInput, FieldViolation, UpdateBookInput};
pub use models::{Book, BookChanges, BookId, NewBook};
pub use service::{BookError, BookService};
