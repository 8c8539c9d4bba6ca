//! Fines repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::FineStatus,
        fine::{CreateFine, Fine, FineBook, FineBorrow, FineDetails, FineQuery},
        normalize_limit, normalize_page,
        user::UserShort,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 20;

const DETAILS_SELECT: &str = r#"
    SELECT f.id, f.user_id, f.borrow_id, f.amount, f.reason, f.description,
           f.status, f.created_date, f.paid_date, f.waived_date, f.waived_by,
           u.name AS user_name, u.email AS user_email,
           bk.id AS bk_id, bk.title AS bk_title, bk.cover_url AS bk_cover_url
    FROM fines f
    JOIN users u ON u.id = f.user_id
    LEFT JOIN borrows b ON b.id = f.borrow_id
    LEFT JOIN books bk ON bk.id = b.book_id
"#;

#[derive(Clone)]
pub struct FinesRepository {
    pool: Pool<Postgres>,
}

impl FinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get fine by ID, joined with user and borrow summaries
    pub async fn get_details(&self, id: Uuid) -> AppResult<FineDetails> {
        let row = sqlx::query(&format!("{} WHERE f.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fine with id {} not found", id)))?;

        Ok(details_from_row(&row))
    }

    /// Create a fine; status starts PENDING
    pub async fn create(&self, fine: &CreateFine) -> AppResult<FineDetails> {
        let fine_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO fines (user_id, borrow_id, amount, reason, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(fine.user_id)
        .bind(fine.borrow_id)
        .bind(fine.amount)
        .bind(&fine.reason)
        .bind(&fine.description)
        .fetch_one(&self.pool)
        .await?;

        self.get_details(fine_id).await
    }

    /// Transition a PENDING fine to PAID or WAIVED. The row is locked while
    /// the terminal-state guard runs.
    pub async fn update_status(
        &self,
        fine_id: Uuid,
        status: FineStatus,
        waived_by: Option<Uuid>,
    ) -> AppResult<FineDetails> {
        let mut tx = self.pool.begin().await?;

        let fine = sqlx::query_as::<_, Fine>("SELECT * FROM fines WHERE id = $1 FOR UPDATE")
            .bind(fine_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fine with id {} not found", fine_id)))?;

        if fine.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Fine is already {}",
                fine.status
            )));
        }

        match status {
            FineStatus::Paid => {
                sqlx::query("UPDATE fines SET status = 'PAID', paid_date = now() WHERE id = $1")
                    .bind(fine_id)
                    .execute(&mut *tx)
                    .await?;
            }
            FineStatus::Waived => {
                sqlx::query(
                    "UPDATE fines SET status = 'WAIVED', waived_date = now(), waived_by = $2 WHERE id = $1",
                )
                .bind(fine_id)
                .bind(waived_by)
                .execute(&mut *tx)
                .await?;
            }
            FineStatus::Pending => {
                return Err(AppError::Validation(
                    "Fine status must be PAID or WAIVED".to_string(),
                ));
            }
        }

        tx.commit().await?;

        self.get_details(fine_id).await
    }

    /// List fines filtered by user and/or status, newest first
    pub async fn search(&self, query: &FineQuery) -> AppResult<(Vec<FineDetails>, i64)> {
        let page = normalize_page(query.page);
        let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM fines f
            WHERE ($1::uuid IS NULL OR f.user_id = $1)
              AND ($2::fine_status IS NULL OR f.status = $2)
            "#,
        )
        .bind(query.user_id)
        .bind(query.status)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(&format!(
            r#"
            {}
            WHERE ($1::uuid IS NULL OR f.user_id = $1)
              AND ($2::fine_status IS NULL OR f.status = $2)
            ORDER BY f.created_date DESC
            LIMIT $3 OFFSET $4
            "#,
            DETAILS_SELECT
        ))
        .bind(query.user_id)
        .bind(query.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.iter().map(details_from_row).collect(), total))
    }
}

fn details_from_row(row: &PgRow) -> FineDetails {
    let user_id: Uuid = row.get("user_id");
    let borrow_id: Option<Uuid> = row.get("borrow_id");
    let book_id: Option<Uuid> = row.get("bk_id");

    let borrow = match (borrow_id, book_id) {
        (Some(id), Some(book_id)) => Some(FineBorrow {
            id,
            book: FineBook {
                id: book_id,
                title: row.get("bk_title"),
                cover_url: row.get("bk_cover_url"),
            },
        }),
        _ => None,
    };

    FineDetails {
        id: row.get("id"),
        user_id,
        borrow_id,
        amount: row.get("amount"),
        reason: row.get("reason"),
        description: row.get("description"),
        status: row.get("status"),
        created_date: row.get("created_date"),
        paid_date: row.get("paid_date"),
        waived_date: row.get("waived_date"),
        waived_by: row.get("waived_by"),
        user: UserShort {
            id: user_id,
            name: row.get("user_name"),
            email: row.get("user_email"),
        },
        borrow,
    }
}
