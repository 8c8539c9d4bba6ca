//! Fine lifecycle endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        fine::{CreateFine, FineDetails, FineQuery, UpdateFineStatus},
        normalize_limit, normalize_page, Pagination,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Fine listing with pagination metadata
#[derive(Serialize, ToSchema)]
pub struct FineListResponse {
    pub fines: Vec<FineDetails>,
    pub pagination: Pagination,
}

/// List fines filtered by user and/or status
#[utoipa::path(
    get,
    path = "/fines",
    tag = "fines",
    params(FineQuery),
    responses(
        (status = 200, description = "Paginated fines", body = FineListResponse)
    )
)]
pub async fn list_fines(
    State(state): State<crate::AppState>,
    Query(query): Query<FineQuery>,
) -> AppResult<Json<FineListResponse>> {
    let (fines, total) = state.services.circulation.list_fines(&query).await?;

    let page = normalize_page(query.page);
    let limit = normalize_limit(query.limit, DEFAULT_PAGE_SIZE);

    Ok(Json(FineListResponse {
        fines,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// Create a fine against a user
#[utoipa::path(
    post,
    path = "/fines",
    tag = "fines",
    request_body = CreateFine,
    responses(
        (status = 201, description = "Fine created", body = FineDetails),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "User or borrow not found")
    )
)]
pub async fn create_fine(
    State(state): State<crate::AppState>,
    Json(fine): Json<CreateFine>,
) -> AppResult<(StatusCode, Json<FineDetails>)> {
    let created = state.services.circulation.create_fine(fine).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Transition a fine to PAID or WAIVED
#[utoipa::path(
    patch,
    path = "/fines",
    tag = "fines",
    request_body = UpdateFineStatus,
    responses(
        (status = 200, description = "Fine updated", body = FineDetails),
        (status = 400, description = "Fine is already in a terminal state"),
        (status = 404, description = "Fine not found")
    )
)]
pub async fn update_fine(
    State(state): State<crate::AppState>,
    Json(update): Json<UpdateFineStatus>,
) -> AppResult<Json<FineDetails>> {
    let fine = state.services.circulation.update_fine_status(update).await?;
    Ok(Json(fine))
}
