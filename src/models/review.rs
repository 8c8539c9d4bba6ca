//! Review model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Review model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub rating: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Review joined with reviewer and book summaries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub rating: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub user: Reviewer,
    pub book: ReviewedBook,
}

/// Reviewer summary embedded in a review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reviewer {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

/// Book summary embedded in a review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewedBook {
    pub id: Uuid,
    pub title: String,
    pub cover_url: Option<String>,
}

/// Create review request. Presence of the ids and rating is checked at the
/// service boundary.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "bookId")]
    pub book_id: Option<Uuid>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default = "default_public", alias = "isPublic")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

/// Review query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReviewQuery {
    #[serde(alias = "bookId")]
    pub book_id: Option<Uuid>,
    /// Include this user's own non-public reviews
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
