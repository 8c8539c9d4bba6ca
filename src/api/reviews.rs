//! Review endpoints

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
        normalize_limit, normalize_page,
        review::{CreateReview, ReviewDetails, ReviewQuery},
        Pagination,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Review listing with pagination metadata
#[derive(Serialize, ToSchema)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewDetails>,
    pub pagination: Pagination,
}

/// List public reviews, plus the caller's own when a user id is given
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "reviews",
    params(ReviewQuery),
    responses(
        (status = 200, description = "Paginated reviews", body = ReviewListResponse)
    )
)]
pub async fn list_reviews(
    State(state): State<crate::AppState>,
    Query(query): Query<ReviewQuery>,
) -> AppResult<Json<ReviewListResponse>> {
    let (reviews, total) = state.services.engagement.list_reviews(&query).await?;

    let page = normalize_page(query.page);
    let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);

    Ok(Json(ReviewListResponse {
        reviews,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// Create a review; the book's rating aggregate updates atomically
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = ReviewDetails),
        (status = 400, description = "Invalid rating or duplicate review"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn create_review(
    State(state): State<crate::AppState>,
    Json(review): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<ReviewDetails>)> {
    let created = state.services.engagement.create_review(review).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
