//! Paged table view handlers.

use super::PageRequest;
use crate::api::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// GET /table - Current table view
///
/// Loads the first page if nothing was requested yet.
#[utoipa::path(
    get,
    path = "/api/v1/table",
    tag = "table",
    responses(
        (status = 200, description = "Current table view", body = crate::types::TableView),
        (status = 502, description = "Upstream API failed", body = crate::error::ApiError)
    )
)]
pub async fn get_table(State(state): State<AppState>) -> crate::Result<impl IntoResponse> {
    let view = state.table.ensure_loaded().await?;
    Ok((StatusCode::OK, Json(view)))
}

/// POST /table/page - Navigate to a page
#[utoipa::path(
    post,
    path = "/api/v1/table/page",
    tag = "table",
    request_body = PageRequest,
    responses(
        (status = 200, description = "Page loaded", body = crate::types::TableView),
        (status = 400, description = "Invalid page or page size", body = crate::error::ApiError),
        (status = 502, description = "Upstream API failed", body = crate::error::ApiError)
    )
)]
pub async fn load_page(
    State(state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> crate::Result<impl IntoResponse> {
    let rows = match request.rows {
        Some(rows) => rows,
        None => state.table.view().await.rows_per_page,
    };
    let view = state.table.load_page(request.page, rows).await?;
    Ok((StatusCode::OK, Json(view)))
}
