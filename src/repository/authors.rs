//! Authors repository for database operations

use std::collections::HashMap;

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorBook, AuthorQuery, CreateAuthor},
        normalize_limit, normalize_page,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, biography, birth_date, nationality, website, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&author.name)
        .bind(&author.biography)
        .bind(author.birth_date)
        .bind(&author.nationality)
        .bind(&author.website)
        .bind(&author.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Search authors by name with pagination, hydrating related books
    pub async fn search(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        let page = normalize_page(query.page);
        let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);
        let offset = (page - 1) * limit;
        let pattern = query.search.as_deref().unwrap_or("");

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM authors WHERE ($1 = '' OR name ILIKE '%' || $1 || '%')",
        )
        .bind(pattern)
        .fetch_one(&self.pool)
        .await?;

        let mut authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT * FROM authors
            WHERE ($1 = '' OR name ILIKE '%' || $1 || '%')
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.load_books(&mut authors).await?;

        Ok((authors, total))
    }

    /// Batch-load book references for a page of authors
    async fn load_books(&self, authors: &mut [Author]) -> AppResult<()> {
        if authors.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = authors.iter().map(|a| a.id).collect();

        let rows = sqlx::query(
            r#"
            SELECT ba.author_id, b.id, b.title, b.cover_url
            FROM book_authors ba
            JOIN books b ON b.id = ba.book_id
            WHERE ba.author_id = ANY($1)
            ORDER BY b.title
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_author: HashMap<Uuid, Vec<AuthorBook>> = HashMap::new();
        for row in rows {
            by_author
                .entry(row.get("author_id"))
                .or_default()
                .push(AuthorBook {
                    id: row.get("id"),
                    title: row.get("title"),
                    cover_url: row.get("cover_url"),
                });
        }

        for author in authors.iter_mut() {
            let books = by_author.remove(&author.id).unwrap_or_default();
            author.book_count = books.len() as i64;
            author.books = books;
        }

        Ok(())
    }
}
