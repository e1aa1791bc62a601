pub mod book;

pub use book::{BookData, BookInput, FieldViolation, UpdateBookInput};
