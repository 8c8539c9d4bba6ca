//! Author endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorQuery, CreateAuthor},
        normalize_limit, normalize_page, Pagination,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Author listing with pagination metadata
#[derive(Serialize, ToSchema)]
pub struct AuthorListResponse {
    pub authors: Vec<Author>,
    pub pagination: Pagination,
}

/// List authors with name search and pagination
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(AuthorQuery),
    responses(
        (status = 200, description = "Paginated authors", body = AuthorListResponse)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<AuthorQuery>,
) -> AppResult<Json<AuthorListResponse>> {
    let (authors, total) = state.services.catalog.search_authors(&query).await?;

    let page = normalize_page(query.page);
    let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);

    Ok(Json(AuthorListResponse {
        authors,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Author name is required")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(author): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state.services.catalog.create_author(author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
