//! Wishlist repository for database operations

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::wishlist::{CreateWishlistItem, WishlistBook, WishlistItemDetails},
};

const DETAILS_SELECT: &str = r#"
    SELECT w.id, w.user_id, w.book_id, w.priority, w.added_date, w.notes,
           bk.title AS bk_title, bk.cover_url AS bk_cover_url,
           c.name AS category_name,
           (SELECT COUNT(*) FROM reviews r WHERE r.book_id = bk.id) AS review_count
    FROM wishlist_items w
    JOIN books bk ON bk.id = w.book_id
    LEFT JOIN categories c ON c.id = bk.category_id
"#;

#[derive(Clone)]
pub struct WishlistRepository {
    pool: Pool<Postgres>,
}

impl WishlistRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// A user's wishlist, highest priority first, ties broken newest first
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<WishlistItemDetails>> {
        let rows = sqlx::query(&format!(
            "{} WHERE w.user_id = $1 ORDER BY w.priority DESC, w.added_date DESC",
            DETAILS_SELECT
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut items: Vec<WishlistItemDetails> = rows.iter().map(details_from_row).collect();
        self.load_author_names(&mut items).await?;

        Ok(items)
    }

    /// Add a book to a user's wishlist
    pub async fn create(&self, item: &CreateWishlistItem) -> AppResult<WishlistItemDetails> {
        let item_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO wishlist_items (user_id, book_id, priority, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(item.user_id)
        .bind(item.book_id)
        .bind(item.priority)
        .bind(&item.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, "Book is already in your wishlist"))?;

        let row = sqlx::query(&format!("{} WHERE w.id = $1", DETAILS_SELECT))
            .bind(item_id)
            .fetch_one(&self.pool)
            .await?;

        let mut items = vec![details_from_row(&row)];
        self.load_author_names(&mut items).await?;

        Ok(items.remove(0))
    }

    /// Remove a book from a user's wishlist by composite key
    pub async fn delete(&self, user_id: Uuid, book_id: Uuid) -> AppResult<()> {
        let deleted = sqlx::query(
            "DELETE FROM wishlist_items WHERE user_id = $1 AND book_id = $2",
        )
        .bind(user_id)
        .bind(book_id)
        .execute(&self.pool)
        .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Wishlist item not found".to_string()));
        }

        Ok(())
    }

    /// Batch-load author names for the wishlisted books
    async fn load_author_names(&self, items: &mut [WishlistItemDetails]) -> AppResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = items.iter().map(|i| i.book_id).collect();

        let rows = sqlx::query(
            r#"
            SELECT ba.book_id, a.name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = ANY($1)
            ORDER BY a.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_book: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in rows {
            by_book
                .entry(row.get("book_id"))
                .or_default()
                .push(row.get("name"));
        }

        for item in items.iter_mut() {
            item.book.authors = by_book.get(&item.book_id).cloned().unwrap_or_default();
        }

        Ok(())
    }
}

fn details_from_row(row: &PgRow) -> WishlistItemDetails {
    let book_id: Uuid = row.get("book_id");
    WishlistItemDetails {
        id: row.get("id"),
        user_id: row.get("user_id"),
        book_id,
        priority: row.get("priority"),
        added_date: row.get("added_date"),
        notes: row.get("notes"),
        book: WishlistBook {
            id: book_id,
            title: row.get("bk_title"),
            cover_url: row.get("bk_cover_url"),
            authors: Vec::new(),
            category: row.get("category_name"),
            review_count: row.get("review_count"),
        },
    }
}
