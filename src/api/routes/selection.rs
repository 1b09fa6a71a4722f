//! Selection handlers.

use super::{
    SelectFirstRequest, SelectionChangeResponse, SelectionResponse, ToggleResponse, clamp_count,
};
use crate::api::AppState;
use crate::types::ArtworkId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// GET /selection - Selected records
#[utoipa::path(
    get,
    path = "/api/v1/selection",
    tag = "selection",
    responses(
        (status = 200, description = "Selected records in insertion order", body = SelectionResponse)
    )
)]
pub async fn list_selection(State(state): State<AppState>) -> impl IntoResponse {
    let items = state.table.selected().await;
    Json(SelectionResponse {
        count: items.len(),
        items,
    })
}

/// POST /selection/:id/toggle - Toggle one record
#[utoipa::path(
    post,
    path = "/api/v1/selection/{id}/toggle",
    tag = "selection",
    params(
        ("id" = u64, Path, description = "Artwork ID")
    ),
    responses(
        (status = 200, description = "Record toggled", body = ToggleResponse),
        (status = 404, description = "Record is neither displayed nor selected", body = crate::error::ApiError)
    )
)]
pub async fn toggle_row(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> crate::Result<impl IntoResponse> {
    let selected = state.table.toggle_row(ArtworkId(id)).await?;
    let selected_total = state.table.view().await.selected.len();
    Ok(Json(ToggleResponse {
        selected,
        selected_total,
    }))
}

/// DELETE /selection/:id - Deselect one record
#[utoipa::path(
    delete,
    path = "/api/v1/selection/{id}",
    tag = "selection",
    params(
        ("id" = u64, Path, description = "Artwork ID")
    ),
    responses(
        (status = 204, description = "Record deselected"),
        (status = 404, description = "Record is not selected", body = crate::error::ApiError)
    )
)]
pub async fn deselect_row(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> crate::Result<impl IntoResponse> {
    state.table.deselect(ArtworkId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /selection/page - Select all rows on the current page
#[utoipa::path(
    post,
    path = "/api/v1/selection/page",
    tag = "selection",
    responses(
        (status = 200, description = "Current page selected", body = SelectionChangeResponse)
    )
)]
pub async fn select_page(State(state): State<AppState>) -> impl IntoResponse {
    let changed = state.table.select_current_page().await;
    change_response(&state, changed).await
}

/// DELETE /selection/page - Deselect all rows on the current page
#[utoipa::path(
    delete,
    path = "/api/v1/selection/page",
    tag = "selection",
    responses(
        (status = 200, description = "Current page deselected", body = SelectionChangeResponse)
    )
)]
pub async fn deselect_page(State(state): State<AppState>) -> impl IntoResponse {
    let changed = state.table.deselect_current_page().await;
    change_response(&state, changed).await
}

/// DELETE /selection - Clear the selection
#[utoipa::path(
    delete,
    path = "/api/v1/selection",
    tag = "selection",
    responses(
        (status = 200, description = "Selection cleared", body = SelectionChangeResponse)
    )
)]
pub async fn clear_selection(State(state): State<AppState>) -> impl IntoResponse {
    let changed = state.table.clear_selection().await;
    change_response(&state, changed).await
}

/// POST /selection/first - Select the first N rows across pages
///
/// Scans pages from the start at the current page size and adds the first
/// `count` records that are not selected yet. The displayed page is not
/// changed.
#[utoipa::path(
    post,
    path = "/api/v1/selection/first",
    tag = "selection",
    request_body = SelectFirstRequest,
    responses(
        (status = 200, description = "Rows selected", body = crate::types::AccumulationReport),
        (status = 409, description = "A select-first run is already in progress", body = crate::error::ApiError),
        (status = 502, description = "Upstream API failed; selection unchanged", body = crate::error::ApiError)
    )
)]
pub async fn select_first(
    State(state): State<AppState>,
    Json(request): Json<SelectFirstRequest>,
) -> crate::Result<impl IntoResponse> {
    let report = state.table.select_first(clamp_count(request.count)).await?;
    Ok((StatusCode::OK, Json(report)))
}

async fn change_response(state: &AppState, changed: usize) -> Json<SelectionChangeResponse> {
    let selected = state.table.view().await.selected.len();
    Json(SelectionChangeResponse { changed, selected })
}
