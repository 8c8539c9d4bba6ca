//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::author::AuthorRef;
use super::category::CategoryRef;
use super::enums::BookFormat;

/// Full book model (DB + API). Join relations are loaded separately.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub isbn13: Option<String>,
    pub isbn10: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub page_count: Option<i32>,
    pub language: String,
    pub format: BookFormat,
    pub file_size: Option<i64>,
    pub cover_url: Option<String>,
    pub file_url: String,
    pub preview_url: Option<String>,
    pub uploaded_by: Uuid,
    pub is_available: bool,
    pub is_featured: bool,
    /// Derived: mean of all review ratings for this book
    pub average_rating: f64,
    /// Derived: number of reviews for this book
    pub ratings_count: i32,
    pub category_id: Option<Uuid>,
    pub publisher_id: Option<Uuid>,
    pub series_id: Option<Uuid>,
    pub series_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Relations (loaded separately)
    #[sqlx(skip)]
    #[serde(default)]
    pub authors: Vec<BookAuthorEntry>,
    #[sqlx(skip)]
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[sqlx(skip)]
    #[serde(default)]
    pub publisher: Option<NamedRef>,
    #[sqlx(skip)]
    #[serde(default)]
    pub series: Option<NamedRef>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<NamedRef>,
    #[sqlx(skip)]
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[sqlx(skip)]
    #[serde(default)]
    pub counts: BookCounts,
}

/// Author attached to a book, with contribution role
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookAuthorEntry {
    pub author: AuthorRef,
    pub role: String,
}

/// Generic id + name reference (publisher, series, genre)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

/// Tag reference with display color
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TagRef {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
}

/// Per-book relation counts
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookCounts {
    pub reviews: i64,
    pub borrows: i64,
    pub wishlist_items: i64,
}

/// Compact book representation embedded in borrows, fines, progress rows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub cover_url: Option<String>,
    pub format: BookFormat,
    pub page_count: Option<i32>,
    pub average_rating: f64,
    pub ratings_count: i32,
}

/// Author attachment in a create-book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookAuthor {
    #[serde(alias = "authorId")]
    pub author_id: Uuid,
    /// Contribution role; defaults to "Author"
    pub role: Option<String>,
}

/// Create book request. Title, file URL, and uploader are required; presence
/// is checked at the service boundary so missing fields answer 400. Book,
/// author, genre, and tag rows are written in a single transaction.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub isbn13: Option<String>,
    pub isbn10: Option<String>,
    #[serde(alias = "publishedDate")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(alias = "pageCount")]
    pub page_count: Option<i32>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub format: BookFormat,
    #[serde(alias = "fileSize")]
    pub file_size: Option<i64>,
    #[serde(alias = "coverUrl")]
    pub cover_url: Option<String>,
    #[serde(alias = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(alias = "previewUrl")]
    pub preview_url: Option<String>,
    #[serde(alias = "uploadedBy")]
    pub uploaded_by: Option<Uuid>,
    #[serde(alias = "categoryId")]
    pub category_id: Option<Uuid>,
    #[serde(alias = "publisherId")]
    pub publisher_id: Option<Uuid>,
    #[serde(alias = "seriesId")]
    pub series_id: Option<Uuid>,
    #[serde(alias = "seriesNumber")]
    pub series_number: Option<i32>,
    #[serde(default)]
    pub authors: Vec<CreateBookAuthor>,
    #[serde(default)]
    pub genres: Vec<Uuid>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
    #[serde(default, alias = "isFeatured")]
    pub is_featured: bool,
}

fn default_language() -> String {
    "en".to_string()
}

/// Sortable book columns; anything else is rejected at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookSortField {
    Title,
    #[serde(alias = "createdAt")]
    CreatedAt,
    #[serde(alias = "publishedDate")]
    PublishedDate,
    #[serde(alias = "averageRating")]
    AverageRating,
    #[serde(alias = "ratingsCount")]
    RatingsCount,
    #[serde(alias = "pageCount")]
    PageCount,
}

impl BookSortField {
    /// Column name interpolated into ORDER BY; values are fixed here, never
    /// taken from the request string.
    pub fn column(&self) -> &'static str {
        match self {
            BookSortField::Title => "title",
            BookSortField::CreatedAt => "created_at",
            BookSortField::PublishedDate => "published_date",
            BookSortField::AverageRating => "average_rating",
            BookSortField::RatingsCount => "ratings_count",
            BookSortField::PageCount => "page_count",
        }
    }
}

impl Default for BookSortField {
    fn default() -> Self {
        BookSortField::CreatedAt
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

/// Book query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Free-text search across title, subtitle, description, ISBNs, and
    /// author names
    pub search: Option<String>,
    #[serde(alias = "categoryId")]
    pub category_id: Option<Uuid>,
    #[serde(alias = "genreId")]
    pub genre_id: Option<Uuid>,
    #[serde(alias = "authorId")]
    pub author_id: Option<Uuid>,
    pub featured: Option<bool>,
    pub format: Option<BookFormat>,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<BookSortField>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<SortOrder>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_maps_to_fixed_columns() {
        assert_eq!(BookSortField::Title.column(), "title");
        assert_eq!(BookSortField::CreatedAt.column(), "created_at");
        assert_eq!(BookSortField::AverageRating.column(), "average_rating");
    }

    #[test]
    fn sort_field_rejects_unknown_columns() {
        assert!(serde_json::from_str::<BookSortField>("\"title\"").is_ok());
        assert!(serde_json::from_str::<BookSortField>("\"createdAt\"").is_ok());
        assert!(serde_json::from_str::<BookSortField>("\"id; DROP TABLE books\"").is_err());
    }

    #[test]
    fn sort_defaults_are_newest_first() {
        assert_eq!(BookSortField::default().column(), "created_at");
        assert_eq!(SortOrder::default().keyword(), "DESC");
    }
}
