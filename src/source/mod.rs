//! Page sources for the artwork table
//!
//! A [`PageSource`] returns one page of artworks for a 1-based page number
//! and a page size. [`ArtworkClient`] is the HTTP implementation backed by
//! the public artwork API; tests and embedders can provide their own.

use crate::types::ArtworkPage;
use async_trait::async_trait;

mod client;

pub use client::{ARTWORK_FIELDS, ArtworkClient};

/// Trait for fetching one page of artworks
///
/// Implementations perform exactly one request per call. Retries, caching and
/// backoff are left to the caller.
///
/// # Examples
///
/// ```no_run
/// use artwork_table::source::{ArtworkClient, PageSource};
/// use artwork_table::config::Config;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let client = ArtworkClient::new(&config.source, config.table.max_page_size)?;
///
/// let page = client.fetch_page(1, 12).await?;
/// println!("{} of {} artworks", page.len(), page.pagination.total);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the records of `page` (1-based) with `limit` records per page
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `page` is zero or `limit` is outside the accepted range
    /// - The upstream cannot be reached or answers with a non-success status
    /// - The response body is not a valid artwork page
    async fn fetch_page(&self, page: u32, limit: u32) -> crate::Result<ArtworkPage>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
