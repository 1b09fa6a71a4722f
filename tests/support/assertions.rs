//! Custom test assertions for integration tests

use artwork_table::{ArtworkId, Event, TableView};
use std::time::Duration;
use tokio::sync::broadcast;

/// Selected identifiers as plain numbers
pub fn selected_ids(view: &TableView) -> Vec<u64> {
    view.selected.iter().map(|id| id.get()).collect()
}

/// Displayed row identifiers as plain numbers
pub fn row_ids(view: &TableView) -> Vec<u64> {
    view.rows.iter().map(|row| row.id.get()).collect()
}

/// Assert the selection holds no identifier twice
pub fn assert_no_duplicates(selected: &[ArtworkId]) {
    let mut seen = std::collections::HashSet::new();
    for id in selected {
        assert!(seen.insert(*id), "artwork {id} selected twice");
    }
}

/// Wait until an event matching `predicate` arrives, or panic after `timeout`
pub async fn wait_for_event<F>(
    events: &mut broadcast::Receiver<Event>,
    timeout: Duration,
    mut predicate: F,
) -> Event
where
    F: FnMut(&Event) -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let event = tokio::time::timeout_at(deadline, events.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event channel closed");
        if predicate(&event) {
            return event;
        }
    }
}
