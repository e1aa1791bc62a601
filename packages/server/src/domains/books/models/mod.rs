pub mod book;

pub use book::{Book, BookChanges, BookId, NewBook};
