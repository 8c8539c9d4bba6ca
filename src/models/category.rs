//! Category model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Category model from database.
/// Parent/children hydration and counts are loaded separately.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    // Relations (loaded separately)
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CategoryRef>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CategoryRef>>,
    #[sqlx(skip)]
    #[serde(default)]
    pub book_count: i64,
    #[sqlx(skip)]
    #[serde(default)]
    pub child_count: i64,
}

/// Short category reference
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// Create category request. Name presence is checked at the service boundary.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "parentId")]
    pub parent_id: Option<Uuid>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
}

/// Category query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CategoryQuery {
    /// Hydrate parent and children references
    #[serde(alias = "includeHierarchy")]
    pub include_hierarchy: Option<bool>,
}
