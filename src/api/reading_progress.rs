//! Reading progress endpoints

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::reading_progress::{
        ReadingProgressDetails, ReadingProgressQuery, UpsertReadingProgress,
    },
};

/// Single-book progress lookup
#[derive(Serialize, ToSchema)]
pub struct SingleProgressResponse {
    pub progress: Option<ReadingProgressDetails>,
}

/// All of a user's progress rows
#[derive(Serialize, ToSchema)]
pub struct ProgressListResponse {
    pub reading_progress: Vec<ReadingProgressDetails>,
}

/// Get reading progress for a user; narrows to one book when book_id is given
#[utoipa::path(
    get,
    path = "/reading-progress",
    tag = "reading-progress",
    params(ReadingProgressQuery),
    responses(
        (status = 200, description = "Progress rows", body = ProgressListResponse),
        (status = 400, description = "User ID is required")
    )
)]
pub async fn get_reading_progress(
    State(state): State<crate::AppState>,
    Query(query): Query<ReadingProgressQuery>,
) -> AppResult<Response> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let rows = state
        .services
        .engagement
        .list_progress(user_id, query.book_id)
        .await?;

    // Single-book lookups answer with one-or-null instead of a list
    if query.book_id.is_some() {
        let progress = rows.into_iter().next();
        return Ok(Json(SingleProgressResponse { progress }).into_response());
    }

    Ok(Json(ProgressListResponse {
        reading_progress: rows,
    })
    .into_response())
}

/// Upsert a user's reading cursor for a book; reading time accumulates
#[utoipa::path(
    post,
    path = "/reading-progress",
    tag = "reading-progress",
    request_body = UpsertReadingProgress,
    responses(
        (status = 200, description = "Progress upserted", body = ReadingProgressDetails),
        (status = 400, description = "User ID and Book ID are required"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn upsert_reading_progress(
    State(state): State<crate::AppState>,
    Json(progress): Json<UpsertReadingProgress>,
) -> AppResult<Json<ReadingProgressDetails>> {
    let upserted = state.services.engagement.upsert_progress(progress).await?;
    Ok(Json(upserted))
}
