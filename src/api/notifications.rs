//! Notification endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        normalize_limit, normalize_page,
        notification::{CreateNotification, MarkNotification, Notification, NotificationQuery},
        Pagination,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Notification listing with pagination and the independent unread count
#[derive(Serialize, ToSchema)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub pagination: Pagination,
    pub unread_count: i64,
}

/// List a user's non-expired notifications
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications with unread count", body = NotificationListResponse),
        (status = 400, description = "User ID is required")
    )
)]
pub async fn list_notifications(
    State(state): State<crate::AppState>,
    Query(query): Query<NotificationQuery>,
) -> AppResult<Json<NotificationListResponse>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let (notifications, total, unread_count) = state
        .services
        .notifications
        .list(user_id, query.unread_only, query.page, query.limit)
        .await?;

    let page = normalize_page(query.page);
    let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);

    Ok(Json(NotificationListResponse {
        notifications,
        pagination: Pagination::new(page, limit, total),
        unread_count,
    }))
}

/// Create a notification for a user
#[utoipa::path(
    post,
    path = "/notifications",
    tag = "notifications",
    request_body = CreateNotification,
    responses(
        (status = 201, description = "Notification created", body = Notification),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_notification(
    State(state): State<crate::AppState>,
    Json(notification): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    let created = state.services.notifications.create(notification).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Mark a notification read or unread
#[utoipa::path(
    patch,
    path = "/notifications",
    tag = "notifications",
    request_body = MarkNotification,
    responses(
        (status = 200, description = "Notification updated", body = Notification),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_notification(
    State(state): State<crate::AppState>,
    Json(request): Json<MarkNotification>,
) -> AppResult<Json<Notification>> {
    let notification_id = request
        .notification_id
        .ok_or_else(|| AppError::Validation("Notification ID is required".to_string()))?;

    let notification = state
        .services
        .notifications
        .mark(notification_id, request.is_read)
        .await?;

    Ok(Json(notification))
}
