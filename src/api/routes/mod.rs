//! Route handlers for the HTTP server
//!
//! Handlers are organized by concern:
//! - [`page`] - The browser page and its form posts
//! - [`table`] - Paged table view
//! - [`selection`] - Row selection and "select first N"
//! - [`system`] - Health, events, OpenAPI

use crate::types::{AccumulationReport, Artwork};
use serde::{Deserialize, Serialize};

mod page;
mod selection;
mod system;
mod table;

// Re-export all handlers so `routes::function_name` works
pub use page::*;
pub use selection::*;
pub use system::*;
pub use table::*;

// ============================================================================
// Query/Request Types (shared across handlers)
// ============================================================================

/// Request body for POST /table/page
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Rows per page (defaults to the current page size)
    pub rows: Option<u32>,
}

/// Request body for POST /selection/first
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SelectFirstRequest {
    /// Number of not-yet-selected rows to add; zero or less selects nothing
    pub count: i64,
}

/// Response for GET /selection
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SelectionResponse {
    /// Number of selected records
    pub count: usize,
    /// Selected records in insertion order
    pub items: Vec<Artwork>,
}

/// Response for bulk selection changes
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SelectionChangeResponse {
    /// Records whose membership changed
    pub changed: usize,
    /// Size of the selection afterwards
    pub selected: usize,
}

/// Response for POST /selection/:id/toggle
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ToggleResponse {
    /// Whether the record is selected after the toggle
    pub selected: bool,
    /// Size of the selection afterwards
    pub selected_total: usize,
}

/// Query parameters for GET /
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// 1-based page number to show
    pub page: Option<u32>,
    /// Rows per page to show
    pub rows: Option<u32>,
    /// Message from the previous form post
    pub notice: Option<String>,
}

/// Form body for POST /selection/first
#[derive(Debug, Default, Deserialize)]
pub struct SelectFirstForm {
    /// Raw `count` field; blank or unparsable means zero
    #[serde(default)]
    pub count: String,
}

impl SelectFirstForm {
    /// Requested count, clamped at zero
    pub fn count(&self) -> usize {
        clamp_count(self.count.trim().parse().unwrap_or(0))
    }
}

/// Negative counts select nothing
pub(crate) fn clamp_count(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}

/// One-line summary of a select-first run for the page notice
pub(crate) fn describe_report(report: &AccumulationReport) -> String {
    use crate::types::StopReason;

    let reason = match report.stop_reason {
        StopReason::QuotaMet => "",
        StopReason::Exhausted => " (no more records)",
        StopReason::ScanLimit => " (scan limit reached)",
    };
    format!(
        "Selected {} of {} requested rows across {} pages{}",
        report.added, report.requested, report.pages_scanned, reason
    )
}
