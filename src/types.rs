//! Core types for artwork-table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for an artwork, as assigned by the upstream API
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ArtworkId(pub u64);

impl ArtworkId {
    /// Create a new ArtworkId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ArtworkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ArtworkId> for u64 {
    fn from(id: ArtworkId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ArtworkId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// One artwork record as returned by the upstream API
///
/// Every field except `id` may be `null` upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Artwork {
    /// Stable upstream identifier
    pub id: ArtworkId,
    /// Artwork title
    #[serde(default)]
    pub title: Option<String>,
    /// Place the artwork originates from
    #[serde(default)]
    pub place_of_origin: Option<String>,
    /// Artist display string (name, nationality, life dates)
    #[serde(default)]
    pub artist_display: Option<String>,
    /// Inscriptions text
    #[serde(default)]
    pub inscriptions: Option<String>,
    /// Start year of the artwork's creation
    #[serde(default)]
    pub date_start: Option<i32>,
    /// End year of the artwork's creation
    #[serde(default)]
    pub date_end: Option<i32>,
}

/// Pagination metadata returned alongside each page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    /// Total number of records known to the server
    pub total: u64,
    /// Page size the server applied
    #[serde(default)]
    pub limit: u32,
    /// Offset of the first record of this page
    #[serde(default)]
    pub offset: u64,
    /// Total number of pages at this page size
    #[serde(default)]
    pub total_pages: u64,
    /// 1-based page number the server returned
    #[serde(default)]
    pub current_page: u32,
}

/// One server-paginated batch of artworks
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArtworkPage {
    /// Records in server order
    pub data: Vec<Artwork>,
    /// Pagination metadata
    pub pagination: Pagination,
}

impl ArtworkPage {
    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the page holds no records
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Load state of the paged view
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    /// No page has been requested yet
    #[default]
    Idle,
    /// A page request is in flight
    Loading,
    /// The displayed rows match the requested page
    Loaded,
    /// The last page request failed; displayed rows are stale
    Failed {
        /// Failure description
        message: String,
    },
}

impl LoadState {
    /// Whether a page request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Why the accumulation loop stopped scanning pages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The requested number of new selections was reached (or was zero)
    QuotaMet,
    /// The server ran out of records before the quota was met
    Exhausted,
    /// The page-scan bound was reached before the quota was met
    ScanLimit,
}

/// Result of a "select the first N rows" request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccumulationReport {
    /// Number of new selections requested
    pub requested: usize,
    /// Number of records newly added to the selection
    pub added: usize,
    /// Number of pages fetched
    pub pages_scanned: u32,
    /// Why scanning stopped
    pub stop_reason: StopReason,
    /// Size of the selection after merging
    pub selected_total: usize,
}

/// Snapshot of the table as shown to a client
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TableView {
    /// Rows of the displayed page
    pub rows: Vec<Artwork>,
    /// 1-based page number last requested
    pub page: u32,
    /// Rows per page last requested
    pub rows_per_page: u32,
    /// 1-based page number `rows` belongs to
    ///
    /// Differs from `page` while a request is pending or after it failed.
    pub shown_page: u32,
    /// Page size `rows` was fetched with
    pub shown_rows_per_page: u32,
    /// Total record count reported by the server
    pub total_records: u64,
    /// Offset of the first displayed row (`(shown_page - 1) * shown_rows_per_page`)
    pub first: u64,
    /// Paged view load state
    pub load_state: LoadState,
    /// Selected artwork identifiers in insertion order
    pub selected: Vec<ArtworkId>,
    /// When the displayed rows were last replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Event emitted by the table controller
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A page request was issued
    PageRequested {
        /// 1-based page number
        page: u32,
        /// Rows per page
        rows: u32,
    },

    /// A page was loaded and is now displayed
    PageLoaded {
        /// 1-based page number
        page: u32,
        /// Number of rows on the page
        count: usize,
        /// Total record count reported by the server
        total: u64,
    },

    /// A page request failed
    PageFailed {
        /// 1-based page number
        page: u32,
        /// Error message
        error: String,
    },

    /// The selection set changed
    SelectionChanged {
        /// Number of selected records
        selected: usize,
    },

    /// An accumulation run started
    AccumulationStarted {
        /// Number of new selections requested
        requested: usize,
        /// Page size used for scanning
        page_size: u32,
    },

    /// An accumulation run finished and its records were merged
    AccumulationFinished {
        /// Summary of the run
        report: AccumulationReport,
    },

    /// An accumulation run failed; the selection was left unchanged
    AccumulationFailed {
        /// Error message
        error: String,
    },
}

impl Event {
    /// Event name used for server-sent events
    pub fn kind(&self) -> &'static str {
        match self {
            Event::PageRequested { .. } => "page_requested",
            Event::PageLoaded { .. } => "page_loaded",
            Event::PageFailed { .. } => "page_failed",
            Event::SelectionChanged { .. } => "selection_changed",
            Event::AccumulationStarted { .. } => "accumulation_started",
            Event::AccumulationFinished { .. } => "accumulation_finished",
            Event::AccumulationFailed { .. } => "accumulation_failed",
        }
    }
}
