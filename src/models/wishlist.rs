//! Wishlist model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Wishlist entry from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub priority: i32,
    pub added_date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Wishlist entry joined with its book, for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistItemDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub priority: i32,
    pub added_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub book: WishlistBook,
}

/// Book summary embedded in a wishlist entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistBook {
    pub id: Uuid,
    pub title: String,
    pub cover_url: Option<String>,
    pub authors: Vec<String>,
    pub category: Option<String>,
    pub review_count: i64,
}

/// Add-to-wishlist request. Presence of both ids is checked at the service
/// boundary.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWishlistItem {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "bookId")]
    pub book_id: Option<Uuid>,
    #[serde(default)]
    pub priority: i32,
    pub notes: Option<String>,
}

/// Wishlist query parameters; DELETE uses both keys
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct WishlistQuery {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "bookId")]
    pub book_id: Option<Uuid>,
}
