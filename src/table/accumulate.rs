//! "Select the first N rows" across pages.

use crate::accumulator::{AccumulationRequest, accumulate};
use crate::error::{Error, Result};
use crate::state::Action;
use crate::types::{AccumulationReport, Event, StopReason};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::ArtworkTable;

/// Clears the in-flight flag when the run ends, including on error
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ArtworkTable {
    /// Select the first `count` not-yet-selected records, scanning from page 1
    ///
    /// Pages are fetched sequentially at the current rows-per-page. The
    /// displayed page is not changed; found records are merged into the
    /// selection in one step once a scan finishes. If rows were selected by
    /// hand meanwhile, so the merge came up short, scanning resumes for the
    /// remainder within the same page-scan budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if another run is in flight, or the first
    /// fetch error (the selection is then left unchanged).
    pub async fn select_first(&self, count: usize) -> Result<AccumulationReport> {
        let _in_flight = InFlight::acquire(&self.accumulating).ok_or_else(|| {
            Error::Conflict("a select-first run is already in progress".into())
        })?;

        let page_size = self.state.read().await.rows_per_page;
        let max_scan_pages = self.config.selection.max_scan_pages;

        self.emit_event(Event::AccumulationStarted {
            requested: count,
            page_size,
        });
        tracing::info!(requested = count, page_size, "Selecting first rows across pages");

        let mut added = 0;
        let mut pages_scanned = 0;
        let mut selected_total = self.state.read().await.selection.len();
        let stop_reason = loop {
            // Scan against the selection as it is now; rows toggled on by hand
            // while an earlier pass was in flight are skipped this time
            let selection = self.state.read().await.selection.clone();
            let request = AccumulationRequest {
                target: count - added,
                page_size,
                max_scan_pages: max_scan_pages - pages_scanned,
            };

            let outcome = match accumulate(self.source.as_ref(), &selection, request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(requested = count, error = %e, "Select-first run failed");
                    self.emit_event(Event::AccumulationFailed {
                        error: e.to_string(),
                    });
                    return Err(e);
                }
            };
            pages_scanned += outcome.pages_scanned;

            let stop_reason = outcome.stop_reason;
            let (before, after) = self
                .dispatch_with(|_| Ok(Action::MergeSelection(outcome.added)))
                .await?;
            added += after.selection.len() - before.selection.len();
            selected_total = after.selection.len();

            if stop_reason != StopReason::QuotaMet || added >= count {
                break stop_reason;
            }
            if pages_scanned >= max_scan_pages {
                break StopReason::ScanLimit;
            }
            tracing::debug!(
                added,
                remaining = count - added,
                pages_scanned,
                "Selection changed during scan, resuming"
            );
        };

        let report = AccumulationReport {
            requested: count,
            added,
            pages_scanned,
            stop_reason,
            selected_total,
        };

        tracing::info!(
            requested = report.requested,
            added = report.added,
            pages_scanned = report.pages_scanned,
            stop_reason = ?report.stop_reason,
            "Select-first run finished"
        );
        if report.added > 0 {
            self.emit_event(Event::SelectionChanged {
                selected: report.selected_total,
            });
        }
        self.emit_event(Event::AccumulationFinished {
            report: report.clone(),
        });

        Ok(report)
    }

    /// Whether a select-first run is in flight
    pub fn is_accumulating(&self) -> bool {
        self.accumulating.load(Ordering::SeqCst)
    }
}
