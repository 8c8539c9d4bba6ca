//! Data models for Athenaeum

pub mod author;
pub mod book;
pub mod borrow;
pub mod category;
pub mod enums;
pub mod fine;
pub mod library_card;
pub mod notification;
pub mod reading_progress;
pub mod review;
pub mod user;
pub mod wishlist;

use serde::Serialize;
use utoipa::ToSchema;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookSummary};
pub use borrow::{Borrow, BorrowDetails};
pub use category::Category;
pub use enums::{BookFormat, BorrowStatus, FineStatus, UserRole};
pub use fine::Fine;
pub use library_card::LibraryCard;
pub use notification::Notification;
pub use reading_progress::ReadingProgress;
pub use review::Review;
pub use user::User;
pub use wishlist::WishlistItem;

/// Pagination metadata returned alongside every paginated listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

/// Normalize a caller-supplied page number (1-based)
pub fn normalize_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Normalize a caller-supplied page size against a per-endpoint default
pub fn normalize_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_pages_up() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.pages, 3);
        let p = Pagination::new(1, 10, 30);
        assert_eq!(p.pages, 3);
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.pages, 0);
    }

    #[test]
    fn page_and_limit_are_clamped() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some(-3)), 1);
        assert_eq!(normalize_page(Some(7)), 7);
        assert_eq!(normalize_limit(None, 12), 12);
        assert_eq!(normalize_limit(Some(0), 12), 1);
        assert_eq!(normalize_limit(Some(500), 12), 100);
    }
}
