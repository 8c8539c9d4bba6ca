//! Category endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::category::{Category, CategoryQuery, CreateCategory},
};

/// Category tree response
#[derive(Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

/// List categories with counts, optionally hydrating the hierarchy
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Category list", body = CategoryListResponse)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<CategoryListResponse>> {
    let categories = state
        .services
        .catalog
        .list_categories(query.include_hierarchy.unwrap_or(false))
        .await?;

    Ok(Json(CategoryListResponse { categories }))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Category name is required"),
        (status = 404, description = "Parent category not found")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    Json(category): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let created = state.services.catalog.create_category(category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
