//! Categories repository for database operations

use std::collections::HashMap;

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CategoryRef, CreateCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new category, returning it with parent and counts hydrated
    pub async fn create(&self, category: &CreateCategory) -> AppResult<Category> {
        if let Some(parent_id) = category.parent_id {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                    .bind(parent_id)
                    .fetch_one(&self.pool)
                    .await?;
            if !exists {
                return Err(AppError::NotFound(format!(
                    "Parent category {} not found",
                    parent_id
                )));
            }
        }

        let mut created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, parent_id, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.parent_id)
        .bind(&category.image_url)
        .fetch_one(&self.pool)
        .await?;

        if let Some(parent_id) = created.parent_id {
            created.parent = sqlx::query_as::<_, CategoryRef>(
                "SELECT id, name FROM categories WHERE id = $1",
            )
            .bind(parent_id)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(created)
    }

    /// List all categories ordered by name, with per-category book and child
    /// counts; optionally hydrate the parent/children references.
    pub async fn list(&self, include_hierarchy: bool) -> AppResult<Vec<Category>> {
        let mut categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        let book_counts = self.count_by("SELECT category_id AS id, COUNT(*) AS n FROM books WHERE category_id IS NOT NULL GROUP BY category_id").await?;
        let child_counts = self.count_by("SELECT parent_id AS id, COUNT(*) AS n FROM categories WHERE parent_id IS NOT NULL GROUP BY parent_id").await?;

        let refs: HashMap<Uuid, CategoryRef> = categories
            .iter()
            .map(|c| {
                (
                    c.id,
                    CategoryRef {
                        id: c.id,
                        name: c.name.clone(),
                    },
                )
            })
            .collect();

        let mut children: HashMap<Uuid, Vec<CategoryRef>> = HashMap::new();
        if include_hierarchy {
            for category in &categories {
                if let Some(parent_id) = category.parent_id {
                    children.entry(parent_id).or_default().push(CategoryRef {
                        id: category.id,
                        name: category.name.clone(),
                    });
                }
            }
        }

        for category in categories.iter_mut() {
            category.book_count = book_counts.get(&category.id).copied().unwrap_or(0);
            category.child_count = child_counts.get(&category.id).copied().unwrap_or(0);
            if include_hierarchy {
                category.parent = category.parent_id.and_then(|id| refs.get(&id).cloned());
                category.children = Some(children.remove(&category.id).unwrap_or_default());
            }
        }

        Ok(categories)
    }

    /// Full category list as short references, for filter UIs
    pub async fn list_refs(&self) -> AppResult<Vec<CategoryRef>> {
        let refs = sqlx::query_as::<_, CategoryRef>(
            "SELECT id, name FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(refs)
    }

    async fn count_by(&self, sql: &str) -> AppResult<HashMap<Uuid, i64>> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.get::<Uuid, _>("id"), row.get::<i64, _>("n")))
            .collect())
    }
}
