//! Wishlist endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::wishlist::{CreateWishlistItem, WishlistItemDetails, WishlistQuery},
};

/// Wishlist response, ordered by priority then recency
#[derive(Serialize, ToSchema)]
pub struct WishlistResponse {
    pub wishlist_items: Vec<WishlistItemDetails>,
}

/// Removal confirmation
#[derive(Serialize, ToSchema)]
pub struct WishlistRemovedResponse {
    pub message: String,
}

/// List a user's wishlist
#[utoipa::path(
    get,
    path = "/wishlist",
    tag = "wishlist",
    params(WishlistQuery),
    responses(
        (status = 200, description = "Wishlist entries", body = WishlistResponse),
        (status = 400, description = "User ID is required")
    )
)]
pub async fn list_wishlist(
    State(state): State<crate::AppState>,
    Query(query): Query<WishlistQuery>,
) -> AppResult<Json<WishlistResponse>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let wishlist_items = state.services.engagement.list_wishlist(user_id).await?;
    Ok(Json(WishlistResponse { wishlist_items }))
}

/// Add a book to a user's wishlist
#[utoipa::path(
    post,
    path = "/wishlist",
    tag = "wishlist",
    request_body = CreateWishlistItem,
    responses(
        (status = 201, description = "Wishlist entry created", body = WishlistItemDetails),
        (status = 400, description = "Book is already in your wishlist"),
        (status = 404, description = "User or book not found")
    )
)]
pub async fn add_to_wishlist(
    State(state): State<crate::AppState>,
    Json(item): Json<CreateWishlistItem>,
) -> AppResult<(StatusCode, Json<WishlistItemDetails>)> {
    let created = state.services.engagement.add_to_wishlist(item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Remove a book from a user's wishlist
#[utoipa::path(
    delete,
    path = "/wishlist",
    tag = "wishlist",
    params(WishlistQuery),
    responses(
        (status = 200, description = "Entry removed", body = WishlistRemovedResponse),
        (status = 400, description = "User ID and Book ID are required"),
        (status = 404, description = "Wishlist item not found")
    )
)]
pub async fn remove_from_wishlist(
    State(state): State<crate::AppState>,
    Query(query): Query<WishlistQuery>,
) -> AppResult<Json<WishlistRemovedResponse>> {
    let (user_id, book_id) = match (query.user_id, query.book_id) {
        (Some(user_id), Some(book_id)) => (user_id, book_id),
        _ => {
            return Err(AppError::Validation(
                "User ID and Book ID are required".to_string(),
            ))
        }
    };

    state
        .services
        .engagement
        .remove_from_wishlist(user_id, book_id)
        .await?;

    Ok(Json(WishlistRemovedResponse {
        message: "Book removed from wishlist".to_string(),
    }))
}
