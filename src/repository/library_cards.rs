//! Library cards repository for database operations

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::library_card::{CardHolder, LibraryCard, LibraryCardDetails},
};

const DETAILS_SELECT: &str = r#"
    SELECT c.id, c.user_id, c.card_number, c.issued_date, c.expiry_date,
           c.max_borrow_limit, c.is_active,
           u.name AS user_name, u.email AS user_email, u.avatar AS user_avatar,
           u.membership_date AS user_membership_date
    FROM library_cards c
    JOIN users u ON u.id = c.user_id
"#;

#[derive(Clone)]
pub struct LibraryCardsRepository {
    pool: Pool<Postgres>,
}

impl LibraryCardsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find a user's card, if one has been issued
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<LibraryCard>> {
        let card = sqlx::query_as::<_, LibraryCard>(
            "SELECT * FROM library_cards WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(card)
    }

    /// Get a user's card joined with its holder
    pub async fn get_details_by_user(&self, user_id: Uuid) -> AppResult<LibraryCardDetails> {
        let row = sqlx::query(&format!("{} WHERE c.user_id = $1", DETAILS_SELECT))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Library card not found".to_string()))?;

        Ok(details_from_row(&row))
    }

    /// Check whether a generated card number is already taken
    pub async fn card_number_exists(&self, card_number: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM library_cards WHERE card_number = $1)",
        )
        .bind(card_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Issue a card. Issue and expiry dates are stamped from the same instant
    /// so the validity period holds exactly; unique indexes on user_id and
    /// card_number back the existence checks performed by the service.
    pub async fn create(
        &self,
        user_id: Uuid,
        card_number: &str,
        issued_date: DateTime<Utc>,
        expiry_date: DateTime<Utc>,
        max_borrow_limit: i32,
    ) -> AppResult<LibraryCardDetails> {
        sqlx::query(
            r#"
            INSERT INTO library_cards (user_id, card_number, issued_date, expiry_date, max_borrow_limit)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(card_number)
        .bind(issued_date)
        .bind(expiry_date)
        .bind(max_borrow_limit)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::on_unique_violation(e, "Library card already exists for this user")
        })?;

        self.get_details_by_user(user_id).await
    }

    /// Partial update of borrow limit and active flag
    pub async fn update(
        &self,
        user_id: Uuid,
        max_borrow_limit: Option<i32>,
        is_active: Option<bool>,
    ) -> AppResult<LibraryCardDetails> {
        let updated = sqlx::query(
            r#"
            UPDATE library_cards
            SET max_borrow_limit = COALESCE($2, max_borrow_limit),
                is_active = COALESCE($3, is_active)
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(max_borrow_limit)
        .bind(is_active)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Library card not found".to_string()));
        }

        self.get_details_by_user(user_id).await
    }
}

fn details_from_row(row: &PgRow) -> LibraryCardDetails {
    let user_id: Uuid = row.get("user_id");
    LibraryCardDetails {
        id: row.get("id"),
        user_id,
        card_number: row.get("card_number"),
        issued_date: row.get("issued_date"),
        expiry_date: row.get("expiry_date"),
        max_borrow_limit: row.get("max_borrow_limit"),
        is_active: row.get("is_active"),
        user: CardHolder {
            id: user_id,
            name: row.get("user_name"),
            email: row.get("user_email"),
            avatar: row.get("user_avatar"),
            membership_date: row.get("user_membership_date"),
        },
    }
}
