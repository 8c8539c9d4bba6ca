//! Books repository for database operations

use std::collections::{HashMap, HashSet};

use sqlx::{Pool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::AuthorRef,
        book::{
            Book, BookAuthorEntry, BookCounts, BookQuery, BookSummary, CreateBook, NamedRef,
            TagRef,
        },
        category::CategoryRef,
        normalize_limit, normalize_page,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 12;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// Get book by ID with all relations
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        let mut books = vec![book];
        self.hydrate(&mut books).await?;
        Ok(books.remove(0))
    }

    /// Compact summary used when embedding a book in another resource
    pub async fn summary_by_id(&self, id: Uuid) -> AppResult<BookSummary> {
        sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT id, title, subtitle, cover_url, format, page_count,
                   average_rating, ratings_count
            FROM books WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// Search available books with typed filters and pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = normalize_page(query.page);
        let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books WHERE is_available = TRUE");
        push_filters(&mut count_query, query);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut select_query =
            QueryBuilder::<Postgres>::new("SELECT * FROM books WHERE is_available = TRUE");
        push_filters(&mut select_query, query);

        let sort_field = query.sort_by.unwrap_or_default();
        let sort_order = query.sort_order.unwrap_or_default();
        select_query.push(format!(
            " ORDER BY {} {}",
            sort_field.column(),
            sort_order.keyword()
        ));
        select_query.push(" LIMIT ");
        select_query.push_bind(limit);
        select_query.push(" OFFSET ");
        select_query.push_bind(offset);

        let mut books = select_query
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(&mut books).await?;

        Ok((books, total))
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Create a book together with its author/genre/tag join rows in a single
    /// transaction; a failing join insert rolls everything back.
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO books (
                title, subtitle, description, isbn13, isbn10, published_date,
                page_count, language, format, file_size, cover_url, file_url,
                preview_url, uploaded_by, category_id, publisher_id, series_id,
                series_number, is_featured
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19
            ) RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.subtitle)
        .bind(&book.description)
        .bind(&book.isbn13)
        .bind(&book.isbn10)
        .bind(book.published_date)
        .bind(book.page_count)
        .bind(&book.language)
        .bind(book.format)
        .bind(book.file_size)
        .bind(&book.cover_url)
        .bind(&book.file_url)
        .bind(&book.preview_url)
        .bind(book.uploaded_by)
        .bind(book.category_id)
        .bind(book.publisher_id)
        .bind(book.series_id)
        .bind(book.series_number)
        .bind(book.is_featured)
        .fetch_one(&mut *tx)
        .await?;

        for author in &book.authors {
            sqlx::query("INSERT INTO book_authors (book_id, author_id, role) VALUES ($1, $2, $3)")
                .bind(book_id)
                .bind(author.author_id)
                .bind(author.role.as_deref().unwrap_or("Author"))
                .execute(&mut *tx)
                .await?;
        }

        for genre_id in &book.genres {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(book_id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        for tag_id in &book.tags {
            sqlx::query("INSERT INTO book_tags (book_id, tag_id) VALUES ($1, $2)")
                .bind(book_id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_by_id(book_id).await
    }

    // =========================================================================
    // RELATIONS
    // =========================================================================

    /// Batch-load authors, category/publisher/series refs, genres, tags, and
    /// relation counts for a page of books.
    async fn hydrate(&self, books: &mut [Book]) -> AppResult<()> {
        if books.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = books.iter().map(|b| b.id).collect();

        let mut authors: HashMap<Uuid, Vec<BookAuthorEntry>> = HashMap::new();
        let rows = sqlx::query(
            r#"
            SELECT ba.book_id, ba.role, a.id, a.name, a.image_url
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = ANY($1)
            ORDER BY a.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        for row in rows {
            authors
                .entry(row.get("book_id"))
                .or_default()
                .push(BookAuthorEntry {
                    author: AuthorRef {
                        id: row.get("id"),
                        name: row.get("name"),
                        image_url: row.get("image_url"),
                    },
                    role: row.get("role"),
                });
        }

        let mut genres: HashMap<Uuid, Vec<NamedRef>> = HashMap::new();
        let rows = sqlx::query(
            r#"
            SELECT bg.book_id, g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = ANY($1)
            ORDER BY g.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        for row in rows {
            genres.entry(row.get("book_id")).or_default().push(NamedRef {
                id: row.get("id"),
                name: row.get("name"),
            });
        }

        let mut tags: HashMap<Uuid, Vec<TagRef>> = HashMap::new();
        let rows = sqlx::query(
            r#"
            SELECT bt.book_id, t.id, t.name, t.color
            FROM book_tags bt
            JOIN tags t ON t.id = bt.tag_id
            WHERE bt.book_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        for row in rows {
            tags.entry(row.get("book_id")).or_default().push(TagRef {
                id: row.get("id"),
                name: row.get("name"),
                color: row.get("color"),
            });
        }

        let categories = self
            .named_refs("categories", books.iter().filter_map(|b| b.category_id))
            .await?;
        let publishers = self
            .named_refs("publishers", books.iter().filter_map(|b| b.publisher_id))
            .await?;
        let series = self
            .named_refs("series", books.iter().filter_map(|b| b.series_id))
            .await?;

        let review_counts = self
            .relation_counts("SELECT book_id, COUNT(*) AS n FROM reviews WHERE book_id = ANY($1) GROUP BY book_id", &ids)
            .await?;
        let borrow_counts = self
            .relation_counts("SELECT book_id, COUNT(*) AS n FROM borrows WHERE book_id = ANY($1) GROUP BY book_id", &ids)
            .await?;
        let wishlist_counts = self
            .relation_counts("SELECT book_id, COUNT(*) AS n FROM wishlist_items WHERE book_id = ANY($1) GROUP BY book_id", &ids)
            .await?;

        for book in books.iter_mut() {
            book.authors = authors.remove(&book.id).unwrap_or_default();
            book.genres = genres.remove(&book.id).unwrap_or_default();
            book.tags = tags.remove(&book.id).unwrap_or_default();
            book.category = book.category_id.and_then(|id| {
                categories.get(&id).map(|r| CategoryRef {
                    id: r.id,
                    name: r.name.clone(),
                })
            });
            book.publisher = book
                .publisher_id
                .and_then(|id| publishers.get(&id).cloned());
            book.series = book.series_id.and_then(|id| series.get(&id).cloned());
            book.counts = BookCounts {
                reviews: review_counts.get(&book.id).copied().unwrap_or(0),
                borrows: borrow_counts.get(&book.id).copied().unwrap_or(0),
                wishlist_items: wishlist_counts.get(&book.id).copied().unwrap_or(0),
            };
        }

        Ok(())
    }

    async fn named_refs(
        &self,
        table: &str,
        ids: impl Iterator<Item = Uuid>,
    ) -> AppResult<HashMap<Uuid, NamedRef>> {
        let ids: Vec<Uuid> = ids.collect::<HashSet<_>>().into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(&format!(
            "SELECT id, name FROM {} WHERE id = ANY($1)",
            table
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id: Uuid = row.get("id");
                (
                    id,
                    NamedRef {
                        id,
                        name: row.get("name"),
                    },
                )
            })
            .collect())
    }

    async fn relation_counts(&self, sql: &str, ids: &[Uuid]) -> AppResult<HashMap<Uuid, i64>> {
        let rows = sqlx::query(sql).bind(ids).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.get::<Uuid, _>("book_id"), row.get::<i64, _>("n")))
            .collect())
    }
}

/// Append the typed filters to a WHERE clause already restricted to
/// available books. Search terms are always bound, never interpolated.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &BookQuery) {
    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        qb.push(" AND (title ILIKE '%' || ");
        qb.push_bind(search.clone());
        qb.push(" || '%' OR subtitle ILIKE '%' || ");
        qb.push_bind(search.clone());
        qb.push(" || '%' OR description ILIKE '%' || ");
        qb.push_bind(search.clone());
        qb.push(" || '%' OR isbn13 ILIKE '%' || ");
        qb.push_bind(search.clone());
        qb.push(" || '%' OR isbn10 ILIKE '%' || ");
        qb.push_bind(search.clone());
        qb.push(" || '%' OR EXISTS (SELECT 1 FROM book_authors ba JOIN authors a ON a.id = ba.author_id WHERE ba.book_id = books.id AND a.name ILIKE '%' || ");
        qb.push_bind(search.clone());
        qb.push(" || '%'))");
    }

    if let Some(category_id) = query.category_id {
        qb.push(" AND category_id = ");
        qb.push_bind(category_id);
    }

    if let Some(genre_id) = query.genre_id {
        qb.push(" AND EXISTS (SELECT 1 FROM book_genres bg WHERE bg.book_id = books.id AND bg.genre_id = ");
        qb.push_bind(genre_id);
        qb.push(")");
    }

    if let Some(author_id) = query.author_id {
        qb.push(" AND EXISTS (SELECT 1 FROM book_authors ba WHERE ba.book_id = books.id AND ba.author_id = ");
        qb.push_bind(author_id);
        qb.push(")");
    }

    if query.featured == Some(true) {
        qb.push(" AND is_featured = TRUE");
    }

    if let Some(format) = query.format {
        qb.push(" AND format = ");
        qb.push_bind(format);
    }
}
