//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::UserRole;

/// Local user row mirrored from the external identity provider
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub firebase_uid: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub membership_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short user representation embedded in other resources
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserShort {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

/// Identity-provider principal synced into the local users table.
/// Field aliases accept the provider's camelCase payloads; presence is
/// checked at the service boundary.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SyncUser {
    #[serde(alias = "firebaseUid")]
    pub firebase_uid: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub name: Option<String>,
}
