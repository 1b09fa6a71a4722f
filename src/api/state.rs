//! Application state for the HTTP server

use crate::{ArtworkTable, Config};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// The table controller
    pub table: Arc<ArtworkTable>,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(table: Arc<ArtworkTable>, config: Arc<Config>) -> Self {
        Self { table, config }
    }
}
