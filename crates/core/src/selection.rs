//! Bulk-action selection over the visible rows.
//!
//! The selection is ephemeral view state and is never persisted. "Select
//! all" always means the rows currently visible after filtering, never the
//! whole collection.

use crate::feedback::FeedbackRecord;
use crate::types::FeedbackId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<FeedbackId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[FeedbackId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &FeedbackId) -> bool {
        self.ids.contains(id)
    }

    /// Bulk-action controls are shown while anything is selected.
    pub fn multi_select_active(&self) -> bool {
        !self.is_empty()
    }

    /// Row checkbox.
    pub fn toggle(&mut self, id: &FeedbackId) {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.clone());
        }
    }

    pub fn remove(&mut self, id: &FeedbackId) {
        self.ids.retain(|s| s != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Header checkbox state: checked when every visible row is selected.
    pub fn all_selected(&self, visible: &[&FeedbackRecord]) -> bool {
        !visible.is_empty()
            && self.ids.len() == visible.len()
            && visible.iter().all(|r| self.contains(&r.id))
    }

    /// Header checkbox click: clears when everything visible is selected,
    /// otherwise selects exactly the visible rows.
    pub fn toggle_all(&mut self, visible: &[&FeedbackRecord]) {
        if self.all_selected(visible) {
            self.clear();
        } else {
            self.ids = visible.iter().map(|r| r.id.clone()).collect();
        }
    }

    /// Drop selected ids that are no longer visible.
    pub fn retain_visible(&mut self, visible: &[&FeedbackRecord]) {
        self.ids.retain(|id| visible.iter().any(|r| &r.id == id));
    }

    pub fn take(&mut self) -> Vec<FeedbackId> {
        std::mem::take(&mut self.ids)
    }
}
