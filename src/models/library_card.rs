//! Library card model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Library card model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LibraryCard {
    pub id: Uuid,
    pub user_id: Uuid,
    pub card_number: String,
    pub issued_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub max_borrow_limit: i32,
    pub is_active: bool,
}

/// Library card joined with its holder
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LibraryCardDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub card_number: String,
    pub issued_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub max_borrow_limit: i32,
    pub is_active: bool,
    pub user: CardHolder,
}

/// Holder summary embedded in a card
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CardHolder {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
    pub membership_date: DateTime<Utc>,
}

/// Issue card request. User presence is checked at the service boundary.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueCard {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "maxBorrowLimit")]
    pub max_borrow_limit: Option<i32>,
}

/// Partial card update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCard {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "maxBorrowLimit")]
    pub max_borrow_limit: Option<i32>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
}

/// Card query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CardQuery {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}
