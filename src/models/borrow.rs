//! Borrow model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::book::BookSummary;
use super::enums::BorrowStatus;

/// Borrow model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Borrow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub status: BorrowStatus,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// Borrow joined with its book, for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub status: BorrowStatus,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub book: BookSummary,
}

/// Create borrow request. Presence of both ids is checked at the boundary.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrow {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "bookId")]
    pub book_id: Option<Uuid>,
}

/// Borrow query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BorrowQuery {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}
