//! Notification service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::notification::{CreateNotification, Notification},
    repository::Repository,
};

#[derive(Clone)]
pub struct NotificationService {
    repository: Repository,
}

impl NotificationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Append a notification to a user's log
    pub async fn create(&self, notification: CreateNotification) -> AppResult<Notification> {
        let has_kind = notification.kind.as_deref().is_some_and(|s| !s.is_empty());
        let has_title = notification.title.as_deref().is_some_and(|s| !s.is_empty());
        let has_message = notification.message.as_deref().is_some_and(|s| !s.is_empty());
        let Some(user_id) = notification.user_id else {
            return Err(AppError::Validation(
                "User ID, type, title, and message are required".to_string(),
            ));
        };
        if !has_kind || !has_title || !has_message {
            return Err(AppError::Validation(
                "User ID, type, title, and message are required".to_string(),
            ));
        }

        self.repository.users.get_by_id(user_id).await?;
        self.repository.notifications.create(&notification).await
    }

    /// List a user's non-expired notifications plus the unread count
    pub async fn list(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<(Vec<Notification>, i64, i64)> {
        self.repository
            .notifications
            .list(user_id, unread_only, page, limit)
            .await
    }

    /// Mark a notification read or unread
    pub async fn mark(&self, notification_id: Uuid, is_read: bool) -> AppResult<Notification> {
        self.repository.notifications.mark(notification_id, is_read).await
    }
}
