//! Users repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Find user by the identity provider's uid
    pub async fn find_by_firebase_uid(&self, firebase_uid: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE firebase_uid = $1")
            .bind(firebase_uid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Create a local user row for a freshly seen principal
    pub async fn create(
        &self,
        firebase_uid: &str,
        email: &str,
        name: Option<&str>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (firebase_uid, email, name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(firebase_uid)
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, "User already exists"))?;

        Ok(user)
    }

    /// Update the display name mirrored from the identity provider
    pub async fn update_name(&self, firebase_uid: &str, name: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET name = $2, updated_at = now()
            WHERE firebase_uid = $1
            RETURNING *
            "#,
        )
        .bind(firebase_uid)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with uid {} not found", firebase_uid)))
    }
}
