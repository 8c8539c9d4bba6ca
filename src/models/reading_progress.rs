//! Reading progress model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Per-user, per-book reading cursor.
/// `reading_time` accumulates across upserts; it is never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReadingProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub current_page: i32,
    pub total_pages: Option<i32>,
    pub progress_percent: f64,
    pub reading_time: i32,
    pub bookmarks: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub last_read_date: DateTime<Utc>,
    pub is_completed: bool,
}

/// Reading progress joined with its book
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadingProgressDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub current_page: i32,
    pub total_pages: Option<i32>,
    pub progress_percent: f64,
    pub reading_time: i32,
    #[schema(value_type = Object)]
    pub bookmarks: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub last_read_date: DateTime<Utc>,
    pub is_completed: bool,
    pub book: ProgressBook,
}

/// Book summary embedded in a progress row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProgressBook {
    pub id: Uuid,
    pub title: String,
    pub cover_url: Option<String>,
    pub page_count: Option<i32>,
}

/// Upsert reading progress request. `reading_time` is the delta to add to
/// the stored total; presence of both ids is checked at the service boundary.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertReadingProgress {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "bookId")]
    pub book_id: Option<Uuid>,
    #[serde(default, alias = "currentPage")]
    pub current_page: i32,
    #[serde(alias = "totalPages")]
    pub total_pages: Option<i32>,
    #[serde(default, alias = "progressPercent")]
    pub progress_percent: f64,
    #[serde(default, alias = "readingTime")]
    pub reading_time: i32,
    #[schema(value_type = Object)]
    pub bookmarks: Option<serde_json::Value>,
    pub notes: Option<String>,
    #[serde(default, alias = "isCompleted")]
    pub is_completed: bool,
}

/// Reading progress query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReadingProgressQuery {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "bookId")]
    pub book_id: Option<Uuid>,
}
