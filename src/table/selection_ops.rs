//! Manual row selection.

use crate::error::{Error, Result};
use crate::state::{Action, reduce};
use crate::types::{Artwork, ArtworkId, Event};

use super::ArtworkTable;

impl ArtworkTable {
    /// Flip the selection of `id`; returns whether it is now selected
    ///
    /// `id` must be a displayed row or an already-selected record, so rows
    /// toggled on another page can still be toggled off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is neither displayed nor selected.
    pub async fn toggle_row(&self, id: ArtworkId) -> Result<bool> {
        let (_, after) = self
            .dispatch_with(|state| {
                let artwork = state
                    .row(id)
                    .or_else(|| state.selection.get(id))
                    .cloned()
                    .ok_or_else(|| Error::NotFound(format!("artwork {id} on the current page")))?;
                Ok(Action::ToggleRow(artwork))
            })
            .await?;

        let selected = after.is_selected(id);
        tracing::debug!(%id, selected, "Row toggled");
        self.emit_event(Event::SelectionChanged {
            selected: after.selection.len(),
        });
        Ok(selected)
    }

    /// Remove `id` from the selection, whichever page it was selected from
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is not selected.
    pub async fn deselect(&self, id: ArtworkId) -> Result<()> {
        let (_, after) = self
            .dispatch_with(|state| {
                let artwork = state
                    .selection
                    .get(id)
                    .cloned()
                    .ok_or_else(|| Error::NotFound(format!("selected artwork {id}")))?;
                Ok(Action::SetRowSelected {
                    artwork,
                    selected: false,
                })
            })
            .await?;

        self.emit_event(Event::SelectionChanged {
            selected: after.selection.len(),
        });
        Ok(())
    }

    /// Select every displayed row; returns how many were newly selected
    pub async fn select_current_page(&self) -> usize {
        let changed = self.apply_selection(Action::SelectCurrentPage).await;
        tracing::debug!(changed, "Selected current page");
        changed
    }

    /// Deselect every displayed row; returns how many were removed
    pub async fn deselect_current_page(&self) -> usize {
        let changed = self.apply_selection(Action::DeselectCurrentPage).await;
        tracing::debug!(changed, "Deselected current page");
        changed
    }

    /// Empty the selection; returns how many records were removed
    pub async fn clear_selection(&self) -> usize {
        let removed = self.apply_selection(Action::ClearSelection).await;
        tracing::info!(removed, "Selection cleared");
        removed
    }

    /// Selected records in insertion order
    pub async fn selected(&self) -> Vec<Artwork> {
        self.state.read().await.selection.iter().cloned().collect()
    }

    /// Apply a selection action and report how many records changed membership
    async fn apply_selection(&self, action: Action) -> usize {
        let (before, after) = {
            let mut state = self.state.write().await;
            let before = state.selection.len();
            *state = reduce(&state, action);
            (before, state.selection.len())
        };

        let changed = before.abs_diff(after);
        if changed > 0 {
            self.emit_event(Event::SelectionChanged { selected: after });
        }
        changed
    }
}
