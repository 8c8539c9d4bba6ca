//! Reviews repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        normalize_limit, normalize_page,
        review::{CreateReview, Review, ReviewDetails, ReviewQuery, ReviewedBook, Reviewer},
    },
};

const DEFAULT_PAGE_SIZE: i64 = 10;

const DETAILS_SELECT: &str = r#"
    SELECT r.id, r.user_id, r.book_id, r.rating, r.title, r.content,
           r.is_public, r.created_at,
           u.name AS user_name, u.avatar AS user_avatar,
           bk.title AS bk_title, bk.cover_url AS bk_cover_url
    FROM reviews r
    JOIN users u ON u.id = r.user_id
    JOIN books bk ON bk.id = r.book_id
"#;

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find an existing review for a (user, book) pair
    pub async fn find_by_user_and_book(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> AppResult<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE user_id = $1 AND book_id = $2",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(review)
    }

    /// Insert a review and recompute the owning book's rating aggregate.
    /// Both writes run in one transaction so the aggregate always reflects
    /// the committed set of reviews.
    pub async fn create_with_aggregate(&self, review: &CreateReview) -> AppResult<Uuid> {
        let mut tx = self.pool.begin().await?;

        let review_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO reviews (user_id, book_id, rating, title, content, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(review.user_id)
        .bind(review.book_id)
        .bind(review.rating)
        .bind(&review.title)
        .bind(&review.content)
        .bind(review.is_public)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::on_unique_violation(e, "You have already reviewed this book")
        })?;

        let row = sqlx::query(
            r#"
            SELECT COALESCE(AVG(rating)::float8, 0) AS average, COUNT(*) AS count
            FROM reviews WHERE book_id = $1
            "#,
        )
        .bind(review.book_id)
        .fetch_one(&mut *tx)
        .await?;

        let average: f64 = row.get("average");
        let count: i64 = row.get("count");

        sqlx::query(
            "UPDATE books SET average_rating = $2, ratings_count = $3, updated_at = now() WHERE id = $1",
        )
        .bind(review.book_id)
        .bind(average)
        .bind(count as i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(review_id)
    }

    /// Get review by ID, joined with reviewer and book summaries
    pub async fn get_details(&self, id: Uuid) -> AppResult<ReviewDetails> {
        let row = sqlx::query(&format!("{} WHERE r.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))?;

        Ok(details_from_row(&row))
    }

    /// List public reviews, plus the caller's own when a user id is given
    pub async fn search(&self, query: &ReviewQuery) -> AppResult<(Vec<ReviewDetails>, i64)> {
        let page = normalize_page(query.page);
        let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reviews r
            WHERE (r.is_public = TRUE OR ($1::uuid IS NOT NULL AND r.user_id = $1))
              AND ($2::uuid IS NULL OR r.book_id = $2)
            "#,
        )
        .bind(query.user_id)
        .bind(query.book_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(&format!(
            r#"
            {}
            WHERE (r.is_public = TRUE OR ($1::uuid IS NOT NULL AND r.user_id = $1))
              AND ($2::uuid IS NULL OR r.book_id = $2)
            ORDER BY r.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            DETAILS_SELECT
        ))
        .bind(query.user_id)
        .bind(query.book_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.iter().map(details_from_row).collect(), total))
    }
}

fn details_from_row(row: &PgRow) -> ReviewDetails {
    let user_id: Uuid = row.get("user_id");
    let book_id: Uuid = row.get("book_id");
    ReviewDetails {
        id: row.get("id"),
        user_id,
        book_id,
        rating: row.get("rating"),
        title: row.get("title"),
        content: row.get("content"),
        is_public: row.get("is_public"),
        created_at: row.get("created_at"),
        user: Reviewer {
            id: user_id,
            name: row.get("user_name"),
            avatar: row.get("user_avatar"),
        },
        book: ReviewedBook {
            id: book_id,
            title: row.get("bk_title"),
            cover_url: row.get("bk_cover_url"),
        },
    }
}
