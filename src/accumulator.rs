//! Cross-page selection accumulation
//!
//! Scans pages 1, 2, 3, ... of a [`PageSource`] at a fixed page size and
//! collects records that are not yet selected, in page order then in-page
//! order, until the requested number of new records has been collected or
//! the data runs out.
//!
//! The scan always terminates. Besides the quota it stops on:
//! - a page shorter than the page size (including an empty page),
//! - having covered `pagination.total` records,
//! - `max_scan_pages` pages fetched, for servers that keep returning full
//!   pages forever.
//!
//! Accumulation does not mutate the selection; the caller merges
//! [`AccumulationOutcome::added`] afterwards. A failed fetch aborts the scan
//! and nothing is returned for merging.

use crate::error::{Error, Result};
use crate::selection::SelectionSet;
use crate::source::PageSource;
use crate::types::{Artwork, ArtworkId, StopReason};
use std::collections::HashSet;

/// Parameters of one accumulation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccumulationRequest {
    /// Number of new records to select
    pub target: usize,
    /// Page size used for every fetch
    pub page_size: u32,
    /// Maximum number of pages to fetch
    pub max_scan_pages: u32,
}

/// Records found by one accumulation run
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct AccumulationOutcome {
    /// Newly found records, in scan order, none of them previously selected
    pub added: Vec<Artwork>,
    /// Number of pages fetched
    pub pages_scanned: u32,
    /// Why scanning stopped
    pub stop_reason: StopReason,
}

/// Scan `source` for up to `request.target` records missing from `selected`
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for a zero page size or scan bound, and
/// propagates the first fetch error unchanged.
pub async fn accumulate(
    source: &dyn PageSource,
    selected: &SelectionSet,
    request: AccumulationRequest,
) -> Result<AccumulationOutcome> {
    let AccumulationRequest {
        target,
        page_size,
        max_scan_pages,
    } = request;

    if target == 0 {
        return Ok(AccumulationOutcome {
            added: Vec::new(),
            pages_scanned: 0,
            stop_reason: StopReason::QuotaMet,
        });
    }
    if page_size == 0 {
        return Err(Error::InvalidRequest("page size must be at least 1".into()));
    }
    if max_scan_pages == 0 {
        return Err(Error::InvalidRequest(
            "page-scan bound must be at least 1".into(),
        ));
    }

    tracing::debug!(
        target,
        page_size,
        max_scan_pages,
        source = source.name(),
        "Starting selection accumulation"
    );

    let mut added: Vec<Artwork> = Vec::new();
    let mut found: HashSet<ArtworkId> = HashSet::new();
    let mut records_seen: u64 = 0;
    let mut pages_scanned: u32 = 0;

    let stop_reason = loop {
        if pages_scanned >= max_scan_pages {
            tracing::warn!(
                pages_scanned,
                added = added.len(),
                target,
                "Selection accumulation hit the page-scan bound"
            );
            break StopReason::ScanLimit;
        }

        let page_number = pages_scanned + 1;
        let page = source.fetch_page(page_number, page_size).await?;
        pages_scanned = page_number;

        let batch_len = page.len();
        let total = page.pagination.total;
        records_seen += batch_len as u64;

        for artwork in page.data {
            if added.len() == target {
                break;
            }
            if selected.contains(artwork.id) || !found.insert(artwork.id) {
                continue;
            }
            added.push(artwork);
        }

        tracing::debug!(
            page = page_number,
            batch = batch_len,
            added = added.len(),
            target,
            "Scanned page for selection"
        );

        if added.len() >= target {
            break StopReason::QuotaMet;
        }
        if batch_len < page_size as usize || records_seen >= total {
            break StopReason::Exhausted;
        }
    };

    Ok(AccumulationOutcome {
        added,
        pages_scanned,
        stop_reason,
    })
}
