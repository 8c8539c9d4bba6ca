//! Identity bridge endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::user::{SyncUser, User},
};

/// Mirror the authenticated principal into the local users table
#[utoipa::path(
    post,
    path = "/auth/user",
    tag = "auth",
    request_body = SyncUser,
    responses(
        (status = 200, description = "User created or updated", body = User),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn sync_user(
    State(state): State<crate::AppState>,
    Json(principal): Json<SyncUser>,
) -> AppResult<Json<User>> {
    let user = state.services.identity.sync_user(principal).await?;
    Ok(Json(user))
}
