//! Bounded movie selection
//!
//! A set of at most [`MAX_SELECTION`] movie ids. Insertion order is kept so
//! request bodies and poster cards come out in the order the user picked.

use crate::models::MovieId;

/// Number of movies a complete selection holds
pub const MAX_SELECTION: usize = 5;

/// Outcome of toggling a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Movie was added
    Added,
    /// Movie was already selected and has been removed
    Removed,
    /// Selection is full, nothing changed
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<MovieId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_SELECTION
    }

    /// Exactly [`MAX_SELECTION`] movies picked
    pub fn is_complete(&self) -> bool {
        self.ids.len() == MAX_SELECTION
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[MovieId] {
        &self.ids
    }

    /// Remove `id` if present, otherwise add it unless full
    pub fn toggle(&mut self, id: &MovieId) -> Toggle {
        if let Some(pos) = self.ids.iter().position(|i| i == id) {
            self.ids.remove(pos);
            Toggle::Removed
        } else if self.is_full() {
            Toggle::Full
        } else {
            self.ids.push(id.clone());
            Toggle::Added
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
