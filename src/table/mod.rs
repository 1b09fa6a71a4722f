//! Table controller split into focused submodules.
//!
//! The `ArtworkTable` struct and its methods are organized by concern:
//! - [`paging`] - Page navigation and the load state machine
//! - [`selection_ops`] - Manual row selection
//! - [`accumulate`] - "Select the first N rows" across pages

mod accumulate;
mod paging;
mod selection_ops;


use crate::config::Config;
use crate::error::Result;
use crate::source::{ArtworkClient, PageSource};
use crate::state::{Action, TableState, reduce};
use crate::types::{Event, TableView};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tokio::sync::{RwLock, broadcast};

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Shared holder of the table state (cloneable - all fields are Arc-wrapped)
///
/// Owns the page source and the current [`TableState`]. Every mutation goes
/// through [`crate::state::reduce`] under a write lock that is never held
/// across a network await.
#[derive(Clone)]
pub struct ArtworkTable {
    /// Where pages come from
    pub(crate) source: Arc<dyn PageSource>,
    /// Current table state
    pub(crate) state: Arc<RwLock<TableState>>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<Event>,
    /// Configuration (validated)
    pub(crate) config: Arc<Config>,
    /// Set while a "select first N" run is in flight
    pub(crate) accumulating: Arc<AtomicBool>,
}

impl ArtworkTable {
    /// Create a table backed by the HTTP artwork API
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = ArtworkClient::new(&config.source, config.table.max_page_size)?;
        tracing::info!(endpoint = %client.endpoint(), "Artwork table using HTTP source");
        Ok(Self::build(config, Arc::new(client)))
    }

    /// Create a table backed by an arbitrary page source
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn with_source(config: Config, source: Arc<dyn PageSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, source))
    }

    fn build(config: Config, source: Arc<dyn PageSource>) -> Self {
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let state = TableState::new(config.table.default_page_size);

        Self {
            source,
            state: Arc::new(RwLock::new(state)),
            event_tx,
            config: Arc::new(config),
            accumulating: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to table events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Name of the page source (for logs and health output)
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Get the current configuration
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Copy of the current table state
    pub async fn snapshot(&self) -> TableState {
        self.state.read().await.clone()
    }

    /// Client-facing view of the current table state
    pub async fn view(&self) -> TableView {
        self.state.read().await.view()
    }

    /// Apply one action and return the resulting state
    pub(crate) async fn dispatch(&self, action: Action) -> TableState {
        let mut state = self.state.write().await;
        *state = reduce(&state, action);
        state.clone()
    }

    /// Derive an action from the current state and apply it atomically
    pub(crate) async fn dispatch_with<F>(&self, f: F) -> Result<(TableState, TableState)>
    where
        F: FnOnce(&TableState) -> Result<Action>,
    {
        let mut state = self.state.write().await;
        let before = state.clone();
        let action = f(&before)?;
        *state = reduce(&before, action);
        Ok((before, state.clone()))
    }

    pub(crate) fn emit_event(&self, event: Event) {
        // send() returns Err if there are no receivers, which is fine - we just drop the event
        self.event_tx.send(event).ok();
    }

    /// Spawn the HTTP server in a background task
    pub fn spawn_api_server(&self) -> tokio::task::JoinHandle<Result<()>> {
        let table = Arc::new(self.clone());
        let config = self.config.clone();

        tokio::spawn(async move { crate::api::start_api_server(table, config).await })
    }
}
