//! Books repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, Pagination, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// One page of books ordered by id
    pub async fn list_page(&self, pagination: &Pagination) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, rating FROM books ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Total number of books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Get book by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, rating FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Insert a book and return it with its assigned id
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, rating)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, rating
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Apply the provided fields (`rating: Some(None)` clears it); `None` when the book does not exist
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Option<Book>> {
        let sets = assignments(data);
        if sets.is_empty() {
            return self.find_by_id(id).await;
        }

        let query = format!(
            "UPDATE books SET {} WHERE id = $1 RETURNING id, title, author, rating",
            sets.join(", ")
        );

        let mut builder = sqlx::query_as::<_, Book>(&query).bind(id);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.author);
        bind_field!(data.rating);

        Ok(builder.fetch_optional(&self.pool).await?)
    }

    /// Delete a book; returns whether a row was removed
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of books whose title contains `term`, ignoring case
    pub async fn search(&self, term: &str, pagination: &Pagination) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, rating FROM books
            WHERE title ILIKE $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(like_pattern(term))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Number of books whose title contains `term`, ignoring case
    pub async fn count_search(&self, term: &str) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*)::bigint FROM books WHERE title ILIKE $1")
                .bind(like_pattern(term))
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `column = $n` for each provided field, numbered from $2 ($1 is the id)
fn assignments(data: &UpdateBook) -> Vec<String> {
    let mut sets: Vec<String> = Vec::new();

    macro_rules! add_field {
        ($field:expr, $name:expr) => {
            if $field.is_some() {
                sets.push(format!("{} = ${}", $name, sets.len() + 2));
            }
        };
    }

    add_field!(data.title, "title");
    add_field!(data.author, "author");
    add_field!(data.rating, "rating");

    sets
}

/// `%term%` with LIKE metacharacters escaped
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
