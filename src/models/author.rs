//! Author model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Full author model from database.
/// Related books and the book count are loaded separately.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub biography: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub nationality: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    // Relations (loaded separately)
    #[sqlx(skip)]
    #[serde(default)]
    pub books: Vec<AuthorBook>,
    #[sqlx(skip)]
    #[serde(default)]
    pub book_count: i64,
}

/// Book reference shown under an author
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorBook {
    pub id: Uuid,
    pub title: String,
    pub cover_url: Option<String>,
}

/// Short author reference embedded in book payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorRef {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
}

/// Create author request. Name presence is checked at the service boundary.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, message = "Author name is required"))]
    pub name: Option<String>,
    pub biography: Option<String>,
    #[serde(alias = "birthDate")]
    pub birth_date: Option<DateTime<Utc>>,
    pub nationality: Option<String>,
    pub website: Option<String>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
}

/// Author query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AuthorQuery {
    /// Case-insensitive name search
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
