//! Circulation service: borrow, fine, and library-card lifecycles

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::{
    config::CirculationConfig,
    error::{AppError, AppResult},
    models::{
        borrow::BorrowDetails,
        fine::{CreateFine, FineDetails, FineQuery, UpdateFineStatus},
        library_card::{IssueCard, LibraryCardDetails, UpdateCard},
    },
    repository::Repository,
};

const CARD_NUMBER_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
    config: CirculationConfig,
}

impl CirculationService {
    pub fn new(repository: Repository, config: CirculationConfig) -> Self {
        Self { repository, config }
    }

    // =========================================================================
    // BORROWS
    // =========================================================================

    /// All borrows for a user, newest first
    pub async fn list_borrows(&self, user_id: Uuid) -> AppResult<Vec<BorrowDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.borrows.get_user_borrows(user_id).await
    }

    /// Borrow a book. A user holds at most one active borrow per book.
    pub async fn create_borrow(&self, user_id: Uuid, book_id: Uuid) -> AppResult<BorrowDetails> {
        self.repository.users.get_by_id(user_id).await?;
        if !self.repository.books.exists(book_id).await? {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book_id
            )));
        }

        if self
            .repository
            .borrows
            .find_active(user_id, book_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Book is already borrowed by this user".to_string(),
            ));
        }

        let borrow_date = Utc::now();
        let due_date = due_date_from(borrow_date, self.config.loan_period_days);
        self.repository
            .borrows
            .create(user_id, book_id, borrow_date, due_date)
            .await
    }

    /// Return a borrowed book; RETURNED is terminal
    pub async fn return_borrow(&self, borrow_id: Uuid) -> AppResult<BorrowDetails> {
        self.repository.borrows.return_borrow(borrow_id).await
    }

    // =========================================================================
    // FINES
    // =========================================================================

    /// List fines filtered by user and/or status
    pub async fn list_fines(&self, query: &FineQuery) -> AppResult<(Vec<FineDetails>, i64)> {
        self.repository.fines.search(query).await
    }

    /// Create a fine against a user, optionally tied to a borrow
    pub async fn create_fine(&self, fine: CreateFine) -> AppResult<FineDetails> {
        let has_reason = fine.reason.as_deref().is_some_and(|r| !r.is_empty());
        let (Some(user_id), Some(_), true) = (fine.user_id, fine.amount, has_reason) else {
            return Err(AppError::Validation(
                "User ID, amount, and reason are required".to_string(),
            ));
        };

        self.repository.users.get_by_id(user_id).await?;
        if let Some(borrow_id) = fine.borrow_id {
            self.repository.borrows.get_details(borrow_id).await?;
        }

        self.repository.fines.create(&fine).await
    }

    /// Transition a fine out of PENDING; PAID and WAIVED are terminal
    pub async fn update_fine_status(&self, update: UpdateFineStatus) -> AppResult<FineDetails> {
        let (Some(fine_id), Some(status)) = (update.fine_id, update.status) else {
            return Err(AppError::Validation(
                "Fine ID and status are required".to_string(),
            ));
        };

        self.repository
            .fines
            .update_status(fine_id, status, update.waived_by)
            .await
    }

    // =========================================================================
    // LIBRARY CARDS
    // =========================================================================

    /// Get a user's card with holder details
    pub async fn get_card(&self, user_id: Uuid) -> AppResult<LibraryCardDetails> {
        self.repository.library_cards.get_details_by_user(user_id).await
    }

    /// Issue a card to a user; a user holds at most one card
    pub async fn issue_card(&self, request: IssueCard) -> AppResult<LibraryCardDetails> {
        let Some(user_id) = request.user_id else {
            return Err(AppError::Validation("User ID is required".to_string()));
        };

        self.repository.users.get_by_id(user_id).await?;

        if self
            .repository
            .library_cards
            .find_by_user(user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Library card already exists for this user".to_string(),
            ));
        }

        let card_number = self.unique_card_number().await?;
        let issued_date = Utc::now();
        let expiry_date = issued_date + Duration::days(self.config.card_validity_days);
        let max_borrow_limit = request
            .max_borrow_limit
            .unwrap_or(self.config.default_max_borrow_limit);

        tracing::info!("Issuing library card {} to user {}", card_number, user_id);

        self.repository
            .library_cards
            .create(
                user_id,
                &card_number,
                issued_date,
                expiry_date,
                max_borrow_limit,
            )
            .await
    }

    /// Partial update of a user's card
    pub async fn update_card(&self, update: UpdateCard) -> AppResult<LibraryCardDetails> {
        let Some(user_id) = update.user_id else {
            return Err(AppError::Validation("User ID is required".to_string()));
        };

        self.repository
            .library_cards
            .update(user_id, update.max_borrow_limit, update.is_active)
            .await
    }

    /// Generate a card number nobody holds yet. The unique index on
    /// card_number is the final arbiter under concurrent issuance.
    async fn unique_card_number(&self) -> AppResult<String> {
        for _ in 0..CARD_NUMBER_ATTEMPTS {
            let candidate = generate_card_number(&mut rand::thread_rng());
            if !self
                .repository
                .library_cards
                .card_number_exists(&candidate)
                .await?
            {
                return Ok(candidate);
            }
        }

        Err(AppError::Internal(
            "Could not allocate a unique card number".to_string(),
        ))
    }
}

/// Due date for a borrow created at `start`
fn due_date_from(start: DateTime<Utc>, loan_period_days: i64) -> DateTime<Utc> {
    start + Duration::days(loan_period_days)
}

/// Card numbers are "LC" followed by 10 random digits
fn generate_card_number<R: Rng>(rng: &mut R) -> String {
    let digits: String = (0..10).map(|_| rng.gen_range(0..10).to_string()).collect();
    format!("LC{}", digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_date_is_loan_period_after_start() {
        let start = DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let due = due_date_from(start, 14);
        assert_eq!((due - start).num_days(), 14);
        assert_eq!(due.to_rfc3339(), "2025-03-15T10:00:00+00:00");
    }

    #[test]
    fn card_number_has_expected_shape() {
        let number = generate_card_number(&mut rand::thread_rng());
        assert_eq!(number.len(), 12);
        assert!(number.starts_with("LC"));
        assert!(number[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn card_numbers_vary() {
        let mut rng = rand::thread_rng();
        let a = generate_card_number(&mut rng);
        let b = generate_card_number(&mut rng);
        let c = generate_card_number(&mut rng);
        assert!(!(a == b && b == c));
    }
}
