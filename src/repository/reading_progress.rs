//! Reading progress repository for database operations

use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::reading_progress::{
        ProgressBook, ReadingProgressDetails, UpsertReadingProgress,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.book_id, p.current_page, p.total_pages,
           p.progress_percent, p.reading_time, p.bookmarks, p.notes,
           p.last_read_date, p.is_completed,
           bk.title AS bk_title, bk.cover_url AS bk_cover_url,
           bk.page_count AS bk_page_count
    FROM reading_progress p
    JOIN books bk ON bk.id = p.book_id
"#;

#[derive(Clone)]
pub struct ReadingProgressRepository {
    pool: Pool<Postgres>,
}

impl ReadingProgressRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Upsert a progress row. On conflict the cursor fields overwrite while
    /// `reading_time` accumulates and `last_read_date` refreshes; the whole
    /// write is a single atomic statement.
    pub async fn upsert(&self, progress: &UpsertReadingProgress) -> AppResult<ReadingProgressDetails> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO reading_progress (
                user_id, book_id, current_page, total_pages, progress_percent,
                reading_time, bookmarks, notes, is_completed
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, book_id) DO UPDATE SET
                current_page = EXCLUDED.current_page,
                total_pages = EXCLUDED.total_pages,
                progress_percent = EXCLUDED.progress_percent,
                reading_time = reading_progress.reading_time + EXCLUDED.reading_time,
                bookmarks = EXCLUDED.bookmarks,
                notes = EXCLUDED.notes,
                is_completed = EXCLUDED.is_completed,
                last_read_date = now()
            RETURNING id
            "#,
        )
        .bind(progress.user_id)
        .bind(progress.book_id)
        .bind(progress.current_page)
        .bind(progress.total_pages)
        .bind(progress.progress_percent)
        .bind(progress.reading_time)
        .bind(&progress.bookmarks)
        .bind(&progress.notes)
        .bind(progress.is_completed)
        .fetch_one(&self.pool)
        .await?;

        let row = sqlx::query(&format!("{} WHERE p.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(details_from_row(&row))
    }

    /// A user's progress rows, most recently read first; optionally narrowed
    /// to one book
    pub async fn list(
        &self,
        user_id: Uuid,
        book_id: Option<Uuid>,
    ) -> AppResult<Vec<ReadingProgressDetails>> {
        let rows = sqlx::query(&format!(
            r#"
            {}
            WHERE p.user_id = $1 AND ($2::uuid IS NULL OR p.book_id = $2)
            ORDER BY p.last_read_date DESC
            "#,
            DETAILS_SELECT
        ))
        .bind(user_id)
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(details_from_row).collect())
    }
}

fn details_from_row(row: &PgRow) -> ReadingProgressDetails {
    let book_id: Uuid = row.get("book_id");
    ReadingProgressDetails {
        id: row.get("id"),
        user_id: row.get("user_id"),
        book_id,
        current_page: row.get("current_page"),
        total_pages: row.get("total_pages"),
        progress_percent: row.get("progress_percent"),
        reading_time: row.get("reading_time"),
        bookmarks: row.get("bookmarks"),
        notes: row.get("notes"),
        last_read_date: row.get("last_read_date"),
        is_completed: row.get("is_completed"),
        book: ProgressBook {
            id: book_id,
            title: row.get("bk_title"),
            cover_url: row.get("bk_cover_url"),
            page_count: row.get("bk_page_count"),
        },
    }
}
