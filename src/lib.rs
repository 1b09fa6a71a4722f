//! # artwork-table
//!
//! Paged, selectable table over a remote artwork collection, served as a
//! browser page and a JSON API.
//!
//! ## Overview
//!
//! - **Paged view** - One page of records is displayed at a time, fetched
//!   from the upstream API on navigation
//! - **Selection** - Rows are selected by identifier and stay selected across
//!   pages
//! - **Select first N** - Scans pages from the start and adds the first N
//!   records that are not selected yet, without moving the displayed page
//! - **Event-driven** - Consumers subscribe to table events, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use artwork_table::{ArtworkTable, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = ArtworkTable::new(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = table.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let view = table.load_page(1, 12).await?;
//!     println!("{} of {} records", view.rows.len(), view.total_records);
//!
//!     let report = table.select_first(30).await?;
//!     println!("selected {} rows", report.added);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Cross-page "select first N" scan
pub mod accumulator;
/// HTTP server: browser page and JSON API
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTML rendering of the table page
pub mod render;
/// Insertion-ordered selection set
pub mod selection;
/// Upstream page sources
pub mod source;
/// Table state and its reducer
pub mod state;
/// Table controller (decomposed into focused submodules)
pub mod table;
/// Core types and events
pub mod types;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use accumulator::{AccumulationOutcome, AccumulationRequest, accumulate};
pub use config::Config;
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use selection::SelectionSet;
pub use source::{ArtworkClient, PageSource};
pub use state::{Action, TableState};
pub use table::ArtworkTable;
pub use types::{
    AccumulationReport, Artwork, ArtworkId, ArtworkPage, Event, LoadState, Pagination,
    StopReason, TableView,
};

/// Helper function to serve the table with graceful signal handling.
///
/// Starts the HTTP server on the configured bind address, waits for a
/// termination signal, then stops accepting connections and lets in-flight
/// requests finish.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use artwork_table::{ArtworkTable, Config, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let table = ArtworkTable::new(Config::default())?;
///
///     // Serve until SIGTERM/SIGINT
///     run_with_shutdown(table).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(table: ArtworkTable) -> Result<()> {
    let shutdown = tokio_util::sync::CancellationToken::new();
    let config = table.config().clone();
    let mut server = tokio::spawn(api::serve_until_cancelled(
        std::sync::Arc::new(table),
        config,
        shutdown.clone(),
    ));

    tokio::select! {
        _ = wait_for_signal() => {
            shutdown.cancel();
        }
        result = &mut server => {
            // Server stopped on its own (bind failure or fatal error)
            return result.map_err(|e| Error::Other(format!("server task failed: {e}")))?;
        }
    }

    server
        .await
        .map_err(|e| Error::Other(format!("server task failed: {e}")))?
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
