//! Identifier-keyed, insertion-ordered selection set

use crate::types::{Artwork, ArtworkId};
use std::collections::HashMap;

/// Set of selected artworks, independent of the displayed page
///
/// Holds at most one record per [`ArtworkId`]. Iteration follows insertion
/// order; re-inserting an identifier that is already present keeps its
/// original position. Two sets are equal when they hold the same records,
/// whatever order those were inserted in.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    order: Vec<ArtworkId>,
    records: HashMap<ArtworkId, Artwork>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected records
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` is selected
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.records.contains_key(&id)
    }

    /// Selected record for `id`
    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.records.get(&id)
    }

    /// Insert a record; returns `false` if its identifier was already selected
    pub fn insert(&mut self, artwork: Artwork) -> bool {
        if self.records.contains_key(&artwork.id) {
            return false;
        }
        self.order.push(artwork.id);
        self.records.insert(artwork.id, artwork);
        true
    }

    /// Remove `id`; returns the removed record if it was selected
    pub fn remove(&mut self, id: ArtworkId) -> Option<Artwork> {
        let removed = self.records.remove(&id)?;
        self.order.retain(|&selected| selected != id);
        Some(removed)
    }

    /// Insert if absent, remove if present; returns whether `id` is now selected
    pub fn toggle(&mut self, artwork: Artwork) -> bool {
        if self.remove(artwork.id).is_some() {
            false
        } else {
            self.insert(artwork)
        }
    }

    /// Insert every record not yet selected; returns how many were added
    pub fn extend<I>(&mut self, artworks: I) -> usize
    where
        I: IntoIterator<Item = Artwork>,
    {
        artworks
            .into_iter()
            .map(|artwork| self.insert(artwork))
            .filter(|&added| added)
            .count()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.order.clear();
        self.records.clear();
    }

    /// Selected identifiers in insertion order
    pub fn ids(&self) -> &[ArtworkId] {
        &self.order
    }

    /// Selected records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Artwork> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl FromIterator<Artwork> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Artwork>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        set.extend(iter);
        set
    }
}
