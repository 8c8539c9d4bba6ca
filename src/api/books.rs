//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookQuery, CreateBook},
        category::CategoryRef,
        normalize_limit, normalize_page, Pagination,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 12;

/// Book listing with pagination metadata and the category filter list
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub pagination: Pagination,
    pub categories: Vec<CategoryRef>,
}

/// List available books with search, filters, and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Paginated books", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookListResponse>> {
    let (books, total, categories) = state.services.catalog.search_books(&query).await?;

    let page = normalize_page(query.page);
    let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);

    Ok(Json(BookListResponse {
        books,
        pagination: Pagination::new(page, limit, total),
        categories,
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a book with its author/genre/tag attachments
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
