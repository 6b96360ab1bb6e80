//! Repository layer for database operations

pub mod books;

use sqlx::{Pool, Postgres};

/// Main repository struct holding one repository per table
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool),
        }
    }
}
