//! Page navigation and the `Idle -> Loading -> Loaded | Failed` state machine.

use crate::error::{Error, Result};
use crate::state::Action;
use crate::types::{Event, LoadState, TableView};
use chrono::Utc;

use super::ArtworkTable;

impl ArtworkTable {
    /// Navigate to `page` (1-based) showing `rows` rows per page
    ///
    /// Enters `Loading`, fetches the page, and enters `Loaded` or `Failed`.
    /// If another navigation started while this fetch was in flight, this
    /// response is stale and leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for a zero page or an unsupported
    /// page size (without changing state), or the fetch error after entering
    /// `Failed`.
    pub async fn load_page(&self, page: u32, rows: u32) -> Result<TableView> {
        self.check_navigation(page, rows)?;

        let seq = self
            .dispatch(Action::PageRequested { page, rows })
            .await
            .request_seq;
        self.emit_event(Event::PageRequested { page, rows });
        tracing::debug!(page, rows, seq, "Page requested");

        match self.source.fetch_page(page, rows).await {
            Ok(fetched) => {
                let count = fetched.len();
                let total = fetched.pagination.total;
                let state = self
                    .dispatch(Action::PageLoaded {
                        seq,
                        page: fetched,
                        at: Utc::now(),
                    })
                    .await;

                if state.request_seq == seq {
                    tracing::info!(page, rows, count, total, "Page loaded");
                    self.emit_event(Event::PageLoaded { page, count, total });
                } else {
                    tracing::debug!(page, seq, latest = state.request_seq, "Dropped stale page");
                }
                Ok(state.view())
            }
            Err(e) => {
                let state = self
                    .dispatch(Action::PageFailed {
                        seq,
                        message: e.to_string(),
                    })
                    .await;
                if state.request_seq == seq {
                    tracing::error!(page, rows, error = %e, "Failed to load page");
                    self.emit_event(Event::PageFailed {
                        page,
                        error: e.to_string(),
                    });
                }
                Err(e)
            }
        }
    }

    /// Re-fetch the current page at the current page size
    pub async fn reload(&self) -> Result<TableView> {
        let (page, rows) = {
            let state = self.state.read().await;
            (state.page, state.rows_per_page)
        };
        self.load_page(page, rows).await
    }

    /// Load the first page if nothing was ever requested
    ///
    /// Returns the current view otherwise, without fetching.
    pub async fn ensure_loaded(&self) -> Result<TableView> {
        let idle = matches!(self.state.read().await.load_state, LoadState::Idle);
        if idle {
            self.reload().await
        } else {
            Ok(self.view().await)
        }
    }

    fn check_navigation(&self, page: u32, rows: u32) -> Result<()> {
        if page == 0 {
            return Err(Error::InvalidRequest("page numbers start at 1".into()));
        }
        let max = self.config.table.max_page_size;
        if rows == 0 || rows > max {
            return Err(Error::InvalidRequest(format!(
                "rows per page must be between 1 and {max}"
            )));
        }
        Ok(())
    }
}
