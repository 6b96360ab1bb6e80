//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Rating from 1 to 5
    pub rating: Option<i32>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

/// Partial update request; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_rating"))]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    /// Absent: unchanged, `null`: cleared, number: new rating
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub rating: Option<Option<i32>>,
}

fn validate_update_rating(data: &UpdateBook) -> Result<(), ValidationError> {
    match data.rating {
        Some(Some(rating)) if !(1..=5).contains(&rating) => {
            let mut error = ValidationError::new("range");
            error.message = Some("Rating must be between 1 and 5".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.rating.is_none()
    }
}

/// Title search request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchBooks {
    /// Case-insensitive substring matched against titles
    pub search: String,
}

/// Body accepted by `POST /books`: either a title search or a new book
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BookSubmission {
    Search(SearchBooks),
    Create(CreateBook),
}

/// Query parameters for paginated book listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<i64>,
    /// Books per page (default: configured page size)
    pub per_page: Option<i64>,
}

/// Resolved LIMIT/OFFSET window for one page of books
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    /// Resolve a query against the configured default and maximum page size.
    ///
    /// The page number is kept as requested (it may be zero or negative);
    /// `per_page` is clamped to `1..=max_per_page`.
    pub fn resolve(query: &BookQuery, default_per_page: i64, max_per_page: i64) -> Self {
        let per_page = query
            .per_page
            .unwrap_or(default_per_page)
            .clamp(1, max_per_page.max(1));
        Self {
            page: query.page.unwrap_or(1),
            per_page,
        }
    }

    /// True for page numbers that can never hold records
    pub fn is_out_of_range(&self) -> bool {
        self.page < 1
    }

    /// Same page size, page number forced to at least 1
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            ..self
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// One page of books plus the size of the whole collection
#[derive(Debug, Clone)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: i64,
}
