//! Notifications repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        normalize_limit, normalize_page,
        notification::{CreateNotification, Notification},
    },
};

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: Pool<Postgres>,
}

impl NotificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append a notification to a user's log
    pub async fn create(&self, notification: &CreateNotification) -> AppResult<Notification> {
        let created = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, type, title, message, data, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(notification.user_id)
        .bind(&notification.kind)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.data)
        .bind(notification.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List a user's non-expired notifications, newest first, plus the total
    /// and the independent unread count.
    pub async fn list(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<(Vec<Notification>, i64, i64)> {
        let page = normalize_page(page);
        let limit = normalize_limit(limit, DEFAULT_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1
              AND (expires_at IS NULL OR expires_at > now())
              AND ($2 = FALSE OR is_read = FALSE)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE user_id = $1
              AND (expires_at IS NULL OR expires_at > now())
              AND ($2 = FALSE OR is_read = FALSE)
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_one(&self.pool)
        .await?;

        let unread_count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE user_id = $1
              AND is_read = FALSE
              AND (expires_at IS NULL OR expires_at > now())
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((notifications, total, unread_count))
    }

    /// Mark a notification read or unread
    pub async fn mark(&self, notification_id: Uuid, is_read: bool) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = $2,
                read_at = CASE WHEN $2 THEN now() ELSE NULL END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(notification_id)
        .bind(is_read)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Notification with id {} not found",
                notification_id
            ))
        })
    }
}
