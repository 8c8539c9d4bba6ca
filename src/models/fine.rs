//! Fine model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::enums::FineStatus;
use super::user::UserShort;

/// Fine model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fine {
    pub id: Uuid,
    pub user_id: Uuid,
    pub borrow_id: Option<Uuid>,
    pub amount: Decimal,
    pub reason: String,
    pub description: Option<String>,
    pub status: FineStatus,
    pub created_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub waived_date: Option<DateTime<Utc>>,
    pub waived_by: Option<Uuid>,
}

/// Fine joined with user and borrow/book summaries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FineDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub borrow_id: Option<Uuid>,
    pub amount: Decimal,
    pub reason: String,
    pub description: Option<String>,
    pub status: FineStatus,
    pub created_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub waived_date: Option<DateTime<Utc>>,
    pub waived_by: Option<Uuid>,
    pub user: UserShort,
    pub borrow: Option<FineBorrow>,
}

/// Borrow reference embedded in a fine
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FineBorrow {
    pub id: Uuid,
    pub book: FineBook,
}

/// Book reference embedded in a fine's borrow
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FineBook {
    pub id: Uuid,
    pub title: String,
    pub cover_url: Option<String>,
}

/// Create fine request. Presence of user, amount, and reason is checked at
/// the service boundary.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFine {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "borrowId")]
    pub borrow_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub reason: Option<String>,
    pub description: Option<String>,
}

/// Fine status transition request. Only PENDING fines may transition, and
/// only to PAID or WAIVED.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFineStatus {
    #[serde(alias = "fineId")]
    pub fine_id: Option<Uuid>,
    pub status: Option<FineStatus>,
    #[serde(alias = "waivedBy")]
    pub waived_by: Option<Uuid>,
}

/// Fine query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct FineQuery {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    pub status: Option<FineStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
