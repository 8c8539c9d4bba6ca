//! Borrow lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowDetails, BorrowQuery, CreateBorrow},
};

/// List a user's borrows, newest first
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    params(BorrowQuery),
    responses(
        (status = 200, description = "User's borrows", body = Vec<BorrowDetails>),
        (status = 400, description = "User ID is required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_borrows(
    State(state): State<crate::AppState>,
    Query(query): Query<BorrowQuery>,
) -> AppResult<Json<Vec<BorrowDetails>>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let borrows = state.services.circulation.list_borrows(user_id).await?;
    Ok(Json(borrows))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Borrow created", body = BorrowDetails),
        (status = 400, description = "Missing fields or book already borrowed by this user"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<BorrowDetails>)> {
    let (Some(user_id), Some(book_id)) = (request.user_id, request.book_id) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let borrow = state
        .services
        .circulation
        .create_borrow(user_id, book_id)
        .await?;

    Ok((StatusCode::CREATED, Json(borrow)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/borrows/{id}/return",
    tag = "borrows",
    params(
        ("id" = Uuid, Path, description = "Borrow ID")
    ),
    responses(
        (status = 200, description = "Borrow returned", body = BorrowDetails),
        (status = 400, description = "Borrow has already been returned"),
        (status = 404, description = "Borrow not found")
    )
)]
pub async fn return_borrow(
    State(state): State<crate::AppState>,
    Path(borrow_id): Path<Uuid>,
) -> AppResult<Json<BorrowDetails>> {
    let borrow = state.services.circulation.return_borrow(borrow_id).await?;
    Ok(Json(borrow))
}
