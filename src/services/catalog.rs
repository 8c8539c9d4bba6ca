//! Catalog management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorQuery, CreateAuthor},
        book::{Book, BookQuery, CreateBook},
        category::{Category, CategoryRef, CreateCategory},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search available books with filters; also returns the category list
    /// used to build filter UIs.
    pub async fn search_books(
        &self,
        query: &BookQuery,
    ) -> AppResult<(Vec<Book>, i64, Vec<CategoryRef>)> {
        let (books, total) = self.repository.books.search(query).await?;
        let categories = self.repository.categories.list_refs().await?;
        Ok((books, total, categories))
    }

    /// Get book by ID with full details
    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book with its author/genre/tag attachments in one
    /// transaction.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        let has_title = book.title.as_deref().is_some_and(|t| !t.is_empty());
        let has_file_url = book.file_url.as_deref().is_some_and(|u| !u.is_empty());
        let Some(uploaded_by) = book.uploaded_by.filter(|_| has_title && has_file_url) else {
            return Err(AppError::Validation(
                "Title, file URL, and uploader are required".to_string(),
            ));
        };

        // The uploader must be a known user
        self.repository.users.get_by_id(uploaded_by).await?;

        tracing::info!(
            "Creating book \"{}\" with {} author(s)",
            book.title.as_deref().unwrap_or_default(),
            book.authors.len()
        );
        self.repository.books.create(&book).await
    }

    /// Create a new author
    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        if author.name.as_deref().map_or(true, str::is_empty) {
            return Err(AppError::Validation("Author name is required".to_string()));
        }

        self.repository.authors.create(&author).await
    }

    /// Search authors by name
    pub async fn search_authors(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.search(query).await
    }

    /// Create a new category
    pub async fn create_category(&self, category: CreateCategory) -> AppResult<Category> {
        if category.name.as_deref().map_or(true, str::is_empty) {
            return Err(AppError::Validation("Category name is required".to_string()));
        }

        self.repository.categories.create(&category).await
    }

    /// List the category tree
    pub async fn list_categories(&self, include_hierarchy: bool) -> AppResult<Vec<Category>> {
        self.repository.categories.list(include_hierarchy).await
    }
}
