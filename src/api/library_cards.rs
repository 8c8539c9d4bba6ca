//! Library card endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::library_card::{CardQuery, IssueCard, LibraryCardDetails, UpdateCard},
};

/// Card lookup response
#[derive(Serialize, ToSchema)]
pub struct CardResponse {
    pub library_card: LibraryCardDetails,
}

/// Get a user's library card
#[utoipa::path(
    get,
    path = "/library-card",
    tag = "library-card",
    params(CardQuery),
    responses(
        (status = 200, description = "Library card", body = CardResponse),
        (status = 400, description = "User ID is required"),
        (status = 404, description = "Library card not found")
    )
)]
pub async fn get_card(
    State(state): State<crate::AppState>,
    Query(query): Query<CardQuery>,
) -> AppResult<Json<CardResponse>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let library_card = state.services.circulation.get_card(user_id).await?;
    Ok(Json(CardResponse { library_card }))
}

/// Issue a library card to a user
#[utoipa::path(
    post,
    path = "/library-card",
    tag = "library-card",
    request_body = IssueCard,
    responses(
        (status = 201, description = "Card issued", body = LibraryCardDetails),
        (status = 400, description = "Library card already exists for this user"),
        (status = 404, description = "User not found")
    )
)]
pub async fn issue_card(
    State(state): State<crate::AppState>,
    Json(request): Json<IssueCard>,
) -> AppResult<(StatusCode, Json<LibraryCardDetails>)> {
    let card = state.services.circulation.issue_card(request).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// Update a user's card limits or active flag
#[utoipa::path(
    patch,
    path = "/library-card",
    tag = "library-card",
    request_body = UpdateCard,
    responses(
        (status = 200, description = "Card updated", body = LibraryCardDetails),
        (status = 404, description = "Library card not found")
    )
)]
pub async fn update_card(
    State(state): State<crate::AppState>,
    Json(update): Json<UpdateCard>,
) -> AppResult<Json<LibraryCardDetails>> {
    let card = state.services.circulation.update_card(update).await?;
    Ok(Json(card))
}
