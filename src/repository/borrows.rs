//! Borrows repository for database operations

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        borrow::{Borrow, BorrowDetails},
        enums::BorrowStatus,
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.user_id, b.book_id, b.status, b.borrow_date, b.due_date,
           b.return_date,
           bk.id AS bk_id, bk.title AS bk_title, bk.subtitle AS bk_subtitle,
           bk.cover_url AS bk_cover_url, bk.format AS bk_format,
           bk.page_count AS bk_page_count, bk.average_rating AS bk_average_rating,
           bk.ratings_count AS bk_ratings_count
    FROM borrows b
    JOIN books bk ON bk.id = b.book_id
"#;

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrow by ID, joined with its book
    pub async fn get_details(&self, id: Uuid) -> AppResult<BorrowDetails> {
        let row = sqlx::query(&format!("{} WHERE b.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow with id {} not found", id)))?;

        Ok(details_from_row(&row))
    }

    /// All borrows for a user, newest first
    pub async fn get_user_borrows(&self, user_id: Uuid) -> AppResult<Vec<BorrowDetails>> {
        let rows = sqlx::query(&format!(
            "{} WHERE b.user_id = $1 ORDER BY b.borrow_date DESC",
            DETAILS_SELECT
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(details_from_row).collect())
    }

    /// Find the active borrow for a (user, book) pair, if any
    pub async fn find_active(&self, user_id: Uuid, book_id: Uuid) -> AppResult<Option<Borrow>> {
        let borrow = sqlx::query_as::<_, Borrow>(
            "SELECT * FROM borrows WHERE user_id = $1 AND book_id = $2 AND status = 'BORROWED'",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(borrow)
    }

    /// Create a new borrow. Borrow and due dates are stamped from the same
    /// instant so the loan period holds exactly. The partial unique index on
    /// active borrows closes the race between the existence check and this
    /// insert.
    pub async fn create(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> AppResult<BorrowDetails> {
        let borrow_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO borrows (user_id, book_id, status, borrow_date, due_date)
            VALUES ($1, $2, 'BORROWED', $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(borrow_date)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::on_unique_violation(e, "Book is already borrowed by this user")
        })?;

        self.get_details(borrow_id).await
    }

    /// Transition a borrow to RETURNED. The row is locked for the duration of
    /// the guard so concurrent returns cannot both pass it.
    pub async fn return_borrow(&self, borrow_id: Uuid) -> AppResult<BorrowDetails> {
        let mut tx = self.pool.begin().await?;

        let borrow = sqlx::query_as::<_, Borrow>(
            "SELECT * FROM borrows WHERE id = $1 FOR UPDATE",
        )
        .bind(borrow_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrow with id {} not found", borrow_id)))?;

        if borrow.status.is_terminal() {
            return Err(AppError::Conflict("Borrow has already been returned".to_string()));
        }

        sqlx::query(
            "UPDATE borrows SET status = 'RETURNED', return_date = now() WHERE id = $1",
        )
        .bind(borrow_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_details(borrow_id).await
    }
}

fn details_from_row(row: &PgRow) -> BorrowDetails {
    BorrowDetails {
        id: row.get("id"),
        user_id: row.get("user_id"),
        book_id: row.get("book_id"),
        status: row.get::<BorrowStatus, _>("status"),
        borrow_date: row.get("borrow_date"),
        due_date: row.get("due_date"),
        return_date: row.get("return_date"),
        book: BookSummary {
            id: row.get("bk_id"),
            title: row.get("bk_title"),
            subtitle: row.get("bk_subtitle"),
            cover_url: row.get("bk_cover_url"),
            format: row.get("bk_format"),
            page_count: row.get("bk_page_count"),
            average_rating: row.get("bk_average_rating"),
            ratings_count: row.get("bk_ratings_count"),
        },
    }
}
