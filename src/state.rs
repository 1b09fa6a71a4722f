//! Table state and the pure reducer that transitions it
//!
//! [`TableState`] is an immutable snapshot of everything the paged view
//! shows: the displayed rows, pagination counters, the load state and the
//! selection set. Every change goes through [`reduce`], which never performs
//! I/O. The controller in [`crate::table`] issues fetches and feeds their
//! results back in as [`Action`]s.
//!
//! Page responses carry the sequence number of the request that produced
//! them. A response whose sequence number is not the latest is stale (the
//! user navigated again while it was in flight) and is dropped. The
//! accumulation loop only ever emits [`Action::MergeSelection`], which never
//! touches rows or counters, so navigation and accumulation cannot clobber
//! each other.

use crate::selection::SelectionSet;
use crate::types::{Artwork, ArtworkId, ArtworkPage, LoadState, TableView};
use chrono::{DateTime, Utc};

/// Snapshot of the paged, selectable table
#[derive(Clone, Debug, PartialEq)]
pub struct TableState {
    /// Rows of the last successfully loaded page
    pub rows: Vec<Artwork>,
    /// 1-based page number last requested
    pub page: u32,
    /// Rows per page last requested
    pub rows_per_page: u32,
    /// 1-based page number `rows` belongs to
    pub shown_page: u32,
    /// Page size `rows` was fetched with
    pub shown_rows_per_page: u32,
    /// Total record count reported by the server
    pub total_records: u64,
    /// Paged view load state
    pub load_state: LoadState,
    /// Selected records, independent of the displayed page
    pub selection: SelectionSet,
    /// Sequence number of the latest page request
    pub request_seq: u64,
    /// When `rows` was last replaced
    pub loaded_at: Option<DateTime<Utc>>,
}

/// State transition requested by the controller
#[derive(Clone, Debug)]
pub enum Action {
    /// A page was requested; enters `Loading` and bumps the request sequence
    PageRequested {
        /// 1-based page number
        page: u32,
        /// Rows per page
        rows: u32,
    },
    /// A page request resolved
    PageLoaded {
        /// Sequence number of the originating request
        seq: u64,
        /// The fetched page
        page: ArtworkPage,
        /// Time the response was received
        at: DateTime<Utc>,
    },
    /// A page request failed
    PageFailed {
        /// Sequence number of the originating request
        seq: u64,
        /// Failure description
        message: String,
    },
    /// Flip one record's membership in the selection
    ToggleRow(Artwork),
    /// Force one record's membership in the selection
    SetRowSelected {
        /// The record
        artwork: Artwork,
        /// Whether it should be selected
        selected: bool,
    },
    /// Add every displayed row to the selection
    SelectCurrentPage,
    /// Remove every displayed row from the selection
    DeselectCurrentPage,
    /// Add records found by the accumulation loop; existing ids are kept
    MergeSelection(Vec<Artwork>),
    /// Empty the selection
    ClearSelection,
}

impl TableState {
    /// Empty table showing page 1 with `rows_per_page` rows
    pub fn new(rows_per_page: u32) -> Self {
        Self {
            rows: Vec::new(),
            page: 1,
            rows_per_page,
            shown_page: 1,
            shown_rows_per_page: rows_per_page,
            total_records: 0,
            load_state: LoadState::Idle,
            selection: SelectionSet::new(),
            request_seq: 0,
            loaded_at: None,
        }
    }

    /// Offset of the first displayed row
    ///
    /// Follows the page the rows were loaded for, not a pending or failed
    /// request.
    pub fn first(&self) -> u64 {
        u64::from(self.shown_page.saturating_sub(1)) * u64::from(self.shown_rows_per_page)
    }

    /// Number of pages at the page size of the displayed rows
    pub fn page_count(&self) -> u64 {
        if self.shown_rows_per_page == 0 {
            return 0;
        }
        self.total_records
            .div_ceil(u64::from(self.shown_rows_per_page))
    }

    /// Displayed row with identifier `id`
    pub fn row(&self, id: ArtworkId) -> Option<&Artwork> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Whether `id` is selected
    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selection.contains(id)
    }

    /// Whether every displayed row is selected (false for an empty page)
    pub fn all_rows_selected(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|row| self.selection.contains(row.id))
    }

    /// Client-facing snapshot
    pub fn view(&self) -> TableView {
        TableView {
            rows: self.rows.clone(),
            page: self.page,
            rows_per_page: self.rows_per_page,
            shown_page: self.shown_page,
            shown_rows_per_page: self.shown_rows_per_page,
            total_records: self.total_records,
            first: self.first(),
            load_state: self.load_state.clone(),
            selected: self.selection.ids().to_vec(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Apply `action` to `state`, returning the next state
pub fn reduce(state: &TableState, action: Action) -> TableState {
    let mut next = state.clone();

    match action {
        Action::PageRequested { page, rows } => {
            next.page = page;
            next.rows_per_page = rows;
            next.request_seq = state.request_seq.wrapping_add(1);
            next.load_state = LoadState::Loading;
        }
        Action::PageLoaded { seq, page, at } => {
            if seq != state.request_seq {
                return next;
            }
            next.total_records = page.pagination.total;
            next.rows = page.data;
            next.shown_page = state.page;
            next.shown_rows_per_page = state.rows_per_page;
            next.load_state = LoadState::Loaded;
            next.loaded_at = Some(at);
        }
        Action::PageFailed { seq, message } => {
            if seq != state.request_seq {
                return next;
            }
            next.load_state = LoadState::Failed { message };
        }
        Action::ToggleRow(artwork) => {
            next.selection.toggle(artwork);
        }
        Action::SetRowSelected { artwork, selected } => {
            if selected {
                next.selection.insert(artwork);
            } else {
                next.selection.remove(artwork.id);
            }
        }
        Action::SelectCurrentPage => {
            next.selection.extend(state.rows.iter().cloned());
        }
        Action::DeselectCurrentPage => {
            for row in &state.rows {
                next.selection.remove(row.id);
            }
        }
        Action::MergeSelection(artworks) => {
            next.selection.extend(artworks);
        }
        Action::ClearSelection => {
            next.selection.clear();
        }
    }

    next
}
