//! Engagement service: reviews, wishlist, and reading progress

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        reading_progress::{ReadingProgressDetails, UpsertReadingProgress},
        review::{CreateReview, ReviewDetails, ReviewQuery},
        wishlist::{CreateWishlistItem, WishlistItemDetails},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EngagementService {
    repository: Repository,
}

impl EngagementService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // REVIEWS
    // =========================================================================

    /// Create a review. One review per user per book; the book's rating
    /// aggregate is recomputed in the same transaction as the insert.
    pub async fn create_review(&self, review: CreateReview) -> AppResult<ReviewDetails> {
        let (Some(user_id), Some(book_id)) = (review.user_id, review.book_id) else {
            return Err(AppError::Validation(
                "User ID, Book ID, and rating are required".to_string(),
            ));
        };
        if review.rating.is_none() {
            return Err(AppError::Validation(
                "User ID, Book ID, and rating are required".to_string(),
            ));
        }
        review
            .validate()
            .map_err(|_| AppError::Validation("Rating must be between 1 and 5".to_string()))?;

        self.repository.users.get_by_id(user_id).await?;
        if !self.repository.books.exists(book_id).await? {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book_id
            )));
        }

        if self
            .repository
            .reviews
            .find_by_user_and_book(user_id, book_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You have already reviewed this book".to_string(),
            ));
        }

        let review_id = self.repository.reviews.create_with_aggregate(&review).await?;
        self.repository.reviews.get_details(review_id).await
    }

    /// List public reviews, plus the caller's own when a user id is given
    pub async fn list_reviews(&self, query: &ReviewQuery) -> AppResult<(Vec<ReviewDetails>, i64)> {
        self.repository.reviews.search(query).await
    }

    // =========================================================================
    // READING PROGRESS
    // =========================================================================

    /// Upsert a user's reading cursor for a book; reading time accumulates
    pub async fn upsert_progress(
        &self,
        progress: UpsertReadingProgress,
    ) -> AppResult<ReadingProgressDetails> {
        let (Some(user_id), Some(book_id)) = (progress.user_id, progress.book_id) else {
            return Err(AppError::Validation(
                "User ID and Book ID are required".to_string(),
            ));
        };

        self.repository.users.get_by_id(user_id).await?;
        if !self.repository.books.exists(book_id).await? {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book_id
            )));
        }

        self.repository.reading_progress.upsert(&progress).await
    }

    /// A user's progress rows, most recently read first
    pub async fn list_progress(
        &self,
        user_id: Uuid,
        book_id: Option<Uuid>,
    ) -> AppResult<Vec<ReadingProgressDetails>> {
        self.repository.reading_progress.list(user_id, book_id).await
    }

    // =========================================================================
    // WISHLIST
    // =========================================================================

    /// A user's wishlist, highest priority first
    pub async fn list_wishlist(&self, user_id: Uuid) -> AppResult<Vec<WishlistItemDetails>> {
        self.repository.wishlist.list(user_id).await
    }

    /// Add a book to a user's wishlist; duplicates are conflicts
    pub async fn add_to_wishlist(
        &self,
        item: CreateWishlistItem,
    ) -> AppResult<WishlistItemDetails> {
        let (Some(user_id), Some(book_id)) = (item.user_id, item.book_id) else {
            return Err(AppError::Validation(
                "User ID and Book ID are required".to_string(),
            ));
        };

        self.repository.users.get_by_id(user_id).await?;
        if !self.repository.books.exists(book_id).await? {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book_id
            )));
        }

        self.repository.wishlist.create(&item).await
    }

    /// Remove a book from a user's wishlist
    pub async fn remove_from_wishlist(&self, user_id: Uuid, book_id: Uuid) -> AppResult<()> {
        self.repository.wishlist.delete(user_id, book_id).await
    }
}
