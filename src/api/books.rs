//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPage, BookQuery, BookSubmission, UpdateBook},
};

/// Paginated book listing
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub success: bool,
    /// Books of the requested page
    pub books: Vec<Book>,
    /// Number of books in the whole collection (or matching the search)
    pub total_books: i64,
}

/// Result of creating a book
#[derive(Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub success: bool,
    /// Id assigned to the new book
    pub created: i32,
    pub books: Vec<Book>,
    pub total_books: i64,
}

/// Result of updating a book
#[derive(Serialize, ToSchema)]
pub struct BookUpdatedResponse {
    pub success: bool,
    pub id: i32,
    pub book: Book,
}

/// Result of deleting a book
#[derive(Serialize, ToSchema)]
pub struct BookDeletedResponse {
    pub success: bool,
    /// Id of the removed book
    pub deleted: i64,
    pub books: Vec<Book>,
    pub total_books: i64,
}

impl From<BookPage> for BookListResponse {
    fn from(page: BookPage) -> Self {
        Self {
            success: true,
            books: page.books,
            total_books: page.total,
        }
    }
}

/// List books ordered by id
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "One page of books", body = BookListResponse),
        (status = 404, description = "Page has no books", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    WithRejection(Query(query), _): WithRejection<Query<BookQuery>, AppError>,
) -> AppResult<Json<BookListResponse>> {
    let page = state.services.books.list(&query).await?;
    Ok(Json(page.into()))
}

/// Create a book, or search titles when the body is `{"search": "..."}`
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    params(BookQuery),
    request_body = crate::models::book::CreateBook,
    responses(
        (status = 200, description = "Book created (or search results)", body = BookCreatedResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid book fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    WithRejection(Query(query), _): WithRejection<Query<BookQuery>, AppError>,
    WithRejection(Json(submission), _): WithRejection<Json<BookSubmission>, AppError>,
) -> AppResult<Response> {
    match submission {
        BookSubmission::Search(search) => {
            let page = state.services.books.search(&search, &query).await?;
            Ok(Json(BookListResponse::from(page)).into_response())
        }
        BookSubmission::Create(data) => {
            let (book, page) = state.services.books.create(&data, &query).await?;
            Ok(Json(BookCreatedResponse {
                success: true,
                created: book.id,
                books: page.books,
                total_books: page.total,
            })
            .into_response())
        }
    }
}

/// Update some fields of a book
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookUpdatedResponse),
        (status = 400, description = "No field to update", body = crate::error::ErrorResponse),
        (status = 422, description = "Unknown book or invalid fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(data), _): WithRejection<Json<UpdateBook>, AppError>,
) -> AppResult<Json<BookUpdatedResponse>> {
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(BookUpdatedResponse {
        success: true,
        id: book.id,
        book,
    }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID"),
        BookQuery
    ),
    responses(
        (status = 200, description = "Book deleted", body = BookDeletedResponse),
        (status = 422, description = "Unknown book", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<BookQuery>, AppError>,
) -> AppResult<Json<BookDeletedResponse>> {
    let page = state.services.books.delete(id, &query).await?;
    Ok(Json(BookDeletedResponse {
        success: true,
        deleted: id,
        books: page.books,
        total_books: page.total,
    }))
}
