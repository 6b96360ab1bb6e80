//! Data models for the bookshelf

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookPage, BookQuery, CreateBook, Pagination, UpdateBook};
