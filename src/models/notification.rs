//! Notification model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Notification model from database.
/// Rows past their `expires_at` are never returned by listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Create notification request. Presence of the required fields is checked
/// at the service boundary.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNotification {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
    #[serde(alias = "expiresAt")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Mark-read request
#[derive(Debug, Deserialize, ToSchema)]
pub struct MarkNotification {
    #[serde(alias = "notificationId")]
    pub notification_id: Option<Uuid>,
    #[serde(default = "default_read", alias = "isRead")]
    pub is_read: bool,
}

fn default_read() -> bool {
    true
}

/// Notification query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct NotificationQuery {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(default, alias = "unreadOnly")]
    pub unread_only: bool,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
