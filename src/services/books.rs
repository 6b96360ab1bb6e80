//! Books service

use validator::Validate;

use crate::{
    config::PaginationConfig,
    error::{AppError, AppResult},
    models::book::{Book, BookPage, BookQuery, CreateBook, Pagination, SearchBooks, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    pagination: PaginationConfig,
}

impl BooksService {
    pub fn new(repository: Repository, pagination: PaginationConfig) -> Self {
        Self {
            repository,
            pagination,
        }
    }

    fn resolve(&self, query: &BookQuery) -> Pagination {
        Pagination::resolve(
            query,
            self.pagination.books_per_page,
            self.pagination.max_per_page,
        )
    }

    /// List one page of books. A page without records is a 404.
    pub async fn list(&self, query: &BookQuery) -> AppResult<BookPage> {
        let pagination = self.resolve(query);
        if pagination.is_out_of_range() {
            return Err(AppError::NotFound(format!("Page {} does not exist", pagination.page)));
        }

        let books = self.repository.books.list_page(&pagination).await?;
        if books.is_empty() {
            return Err(AppError::NotFound(format!("Page {} has no books", pagination.page)));
        }

        let total = self.repository.books.count().await?;
        Ok(BookPage { books, total })
    }

    /// Page returned alongside a write; may be empty
    async fn refreshed_page(&self, query: &BookQuery) -> AppResult<BookPage> {
        let pagination = self.resolve(query).clamped();
        let books = self.repository.books.list_page(&pagination).await?;
        let total = self.repository.books.count().await?;
        Ok(BookPage { books, total })
    }

    /// Create a book and return it together with the refreshed listing
    pub async fn create(&self, data: &CreateBook, query: &BookQuery) -> AppResult<(Book, BookPage)> {
        data.validate()?;

        let book = self.repository.books.create(data).await?;
        tracing::info!("Book created: id={} title={:?}", book.id, book.title);

        let page = self.refreshed_page(query).await?;
        Ok((book, page))
    }

    /// Case-insensitive title search; no match is an empty page, not an error
    pub async fn search(&self, data: &SearchBooks, query: &BookQuery) -> AppResult<BookPage> {
        let pagination = self.resolve(query).clamped();
        let term = data.search.trim();
        tracing::debug!("Book search: term={:?} page={}", term, pagination.page);

        let books = self.repository.books.search(term, &pagination).await?;
        let total = self.repository.books.count_search(term).await?;
        Ok(BookPage { books, total })
    }

    /// Apply a partial update. An unknown id is unprocessable, not a 404.
    pub async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        let id = stored_id(id)?;
        if self.repository.books.find_by_id(id).await?.is_none() {
            return Err(missing(id.into()));
        }

        if data.is_empty() {
            return Err(AppError::BadRequest(
                "At least one field must be provided for update".to_string(),
            ));
        }
        data.validate()?;

        let book = self
            .repository
            .books
            .update(id, data)
            .await?
            .ok_or_else(|| missing(id.into()))?;
        tracing::info!("Book updated: id={}", id);
        Ok(book)
    }

    /// Delete a book and return the refreshed listing
    pub async fn delete(&self, id: i64, query: &BookQuery) -> AppResult<BookPage> {
        let id = stored_id(id)?;
        if self.repository.books.find_by_id(id).await?.is_none() {
            return Err(missing(id.into()));
        }

        if !self.repository.books.delete(id).await? {
            return Err(missing(id.into()));
        }
        tracing::info!("Book deleted: id={}", id);

        self.refreshed_page(query).await
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}

fn missing(id: i64) -> AppError {
    AppError::Unprocessable(format!("Book {} not found", id))
}

/// Ids outside the column range can never name a stored book
fn stored_id(id: i64) -> AppResult<i32> {
    i32::try_from(id).map_err(|_| missing(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_beyond_i32_are_unprocessable() {
        assert_eq!(stored_id(11).unwrap(), 11);
        assert!(matches!(stored_id(99_999_999_999), Err(AppError::Unprocessable(_))));
        assert!(matches!(stored_id(i64::MIN), Err(AppError::Unprocessable(_))));
    }
}
