//! Bookshelf server
//!
//! A REST JSON API over a single PostgreSQL table of books: paginated
//! listing, creation, title search, partial update and deletion.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire repository and services on top of a connection pool
    pub fn new(config: &AppConfig, pool: sqlx::PgPool) -> Self {
        let repository = repository::Repository::new(pool);
        let services = services::Services::new(repository, config.pagination.clone());
        Self {
            services: Arc::new(services),
        }
    }
}
