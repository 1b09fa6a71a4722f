//! Browser page handlers.
//!
//! Every form post applies one action and redirects back to `/` with an
//! optional one-line notice, so reloading the page never repeats an action.

use super::{IndexQuery, SelectFirstForm, describe_report};
use crate::api::AppState;
use crate::error::Error;
use crate::render::{PageOptions, render_page};
use crate::types::ArtworkId;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
};

/// GET / - Render the table
///
/// `?page=&rows=` navigates before rendering. Changing `rows` without a
/// `page` returns to page 1. Without either, the current page is shown and
/// the first page is loaded on the first visit.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> impl IntoResponse {
    let current = state.table.view().await;
    let mut notice = query.notice;

    let result = if query.page.is_some() || query.rows.is_some() {
        let rows = query.rows.unwrap_or(current.rows_per_page);
        let page = match query.page {
            Some(page) => page,
            None if rows != current.rows_per_page => 1,
            None => current.page,
        };
        state.table.load_page(page, rows).await
    } else {
        state.table.ensure_loaded().await
    };

    // Fetch failures show up through the Failed load state
    if let Err(e @ Error::InvalidRequest(_)) = result {
        notice = Some(e.to_string());
    }

    let view = state.table.view().await;
    let mut rows_per_page_options = state.config.page_size_options();
    if !rows_per_page_options.contains(&view.rows_per_page) {
        rows_per_page_options.push(view.rows_per_page);
        rows_per_page_options.sort_unstable();
    }

    Html(render_page(
        &view,
        &PageOptions {
            rows_per_page_options: &rows_per_page_options,
            accumulating: state.table.is_accumulating(),
            notice: notice.as_deref(),
        },
    ))
}

/// POST /rows/:id/toggle - Toggle one row
pub async fn toggle_row_form(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    match state.table.toggle_row(ArtworkId(id)).await {
        Ok(_) => back(None),
        Err(e) => back(Some(e.to_string())),
    }
}

/// POST /page/select - Select every row on the current page
pub async fn select_page_form(State(state): State<AppState>) -> Redirect {
    state.table.select_current_page().await;
    back(None)
}

/// POST /page/deselect - Deselect every row on the current page
pub async fn deselect_page_form(State(state): State<AppState>) -> Redirect {
    state.table.deselect_current_page().await;
    back(None)
}

/// POST /selection/first - Select the first N rows across pages
pub async fn select_first_form(
    State(state): State<AppState>,
    Form(form): Form<SelectFirstForm>,
) -> Redirect {
    match state.table.select_first(form.count()).await {
        Ok(report) => back(Some(describe_report(&report))),
        Err(e) => back(Some(format!("Nothing selected: {e}"))),
    }
}

/// POST /selection/clear - Clear the selection
pub async fn clear_selection_form(State(state): State<AppState>) -> Redirect {
    let removed = state.table.clear_selection().await;
    back(Some(format!("Cleared {removed} selected rows")))
}

/// Redirect to the table page, carrying `notice` in the query string
fn back(notice: Option<String>) -> Redirect {
    match notice {
        Some(notice) => {
            let encoded: String = url::form_urlencoded::byte_serialize(notice.as_bytes()).collect();
            Redirect::to(&format!("/?notice={encoded}"))
        }
        None => Redirect::to("/"),
    }
}
