//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, authors, books, borrows, categories, fines, health, library_cards, notifications,
    reading_progress, reviews, wishlist,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Athenaeum API",
        version = "0.3.0",
        description = "Digital Library Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::sync_user,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        // Authors
        authors::list_authors,
        authors::create_author,
        // Categories
        categories::list_categories,
        categories::create_category,
        // Borrows
        borrows::list_borrows,
        borrows::create_borrow,
        borrows::return_borrow,
        // Fines
        fines::list_fines,
        fines::create_fine,
        fines::update_fine,
        // Library cards
        library_cards::get_card,
        library_cards::issue_card,
        library_cards::update_card,
        // Reviews
        reviews::list_reviews,
        reviews::create_review,
        // Wishlist
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        // Reading progress
        reading_progress::get_reading_progress,
        reading_progress::upsert_reading_progress,
        // Notifications
        notifications::list_notifications,
        notifications::create_notification,
        notifications::mark_notification,
    ),
    components(
        schemas(
            // Shared
            crate::error::ErrorResponse,
            crate::models::Pagination,
            crate::models::enums::UserRole,
            crate::models::enums::BookFormat,
            crate::models::enums::BorrowStatus,
            crate::models::enums::FineStatus,
            // Health
            health::HealthResponse,
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::SyncUser,
            // Books
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::BookAuthorEntry,
            crate::models::book::BookCounts,
            crate::models::book::NamedRef,
            crate::models::book::TagRef,
            crate::models::book::CreateBook,
            crate::models::book::CreateBookAuthor,
            crate::models::book::BookSortField,
            crate::models::book::SortOrder,
            books::BookListResponse,
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorBook,
            crate::models::author::AuthorRef,
            crate::models::author::CreateAuthor,
            authors::AuthorListResponse,
            // Categories
            crate::models::category::Category,
            crate::models::category::CategoryRef,
            crate::models::category::CreateCategory,
            categories::CategoryListResponse,
            // Borrows
            crate::models::borrow::BorrowDetails,
            crate::models::borrow::CreateBorrow,
            // Fines
            crate::models::fine::FineDetails,
            crate::models::fine::FineBorrow,
            crate::models::fine::FineBook,
            crate::models::fine::CreateFine,
            crate::models::fine::UpdateFineStatus,
            fines::FineListResponse,
            // Library cards
            crate::models::library_card::LibraryCardDetails,
            crate::models::library_card::CardHolder,
            crate::models::library_card::IssueCard,
            crate::models::library_card::UpdateCard,
            library_cards::CardResponse,
            // Reviews
            crate::models::review::ReviewDetails,
            crate::models::review::Reviewer,
            crate::models::review::ReviewedBook,
            crate::models::review::CreateReview,
            reviews::ReviewListResponse,
            // Wishlist
            crate::models::wishlist::WishlistItemDetails,
            crate::models::wishlist::WishlistBook,
            crate::models::wishlist::CreateWishlistItem,
            wishlist::WishlistResponse,
            wishlist::WishlistRemovedResponse,
            // Reading progress
            crate::models::reading_progress::ReadingProgressDetails,
            crate::models::reading_progress::ProgressBook,
            crate::models::reading_progress::UpsertReadingProgress,
            reading_progress::SingleProgressResponse,
            reading_progress::ProgressListResponse,
            // Notifications
            crate::models::notification::Notification,
            crate::models::notification::CreateNotification,
            crate::models::notification::MarkNotification,
            notifications::NotificationListResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Identity bridge"),
        (name = "books", description = "Catalog books"),
        (name = "authors", description = "Catalog authors"),
        (name = "categories", description = "Catalog categories"),
        (name = "borrows", description = "Borrow lifecycle"),
        (name = "fines", description = "Fine lifecycle"),
        (name = "library-card", description = "Library cards"),
        (name = "reviews", description = "Book reviews"),
        (name = "wishlist", description = "User wishlists"),
        (name = "reading-progress", description = "Reading progress"),
        (name = "notifications", description = "User notifications")
    )
)]
pub struct ApiDoc;

/// Router serving the Swagger UI and the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
