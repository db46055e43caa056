//! Shared collection state and its lifecycle reducers.
//!
//! Each entity service mirrors one remote collection as
//! `{ items, loading, error }`. Reducers are pure and synchronous; the
//! asynchronous boundary hands them a discriminated result and exactly one
//! terminal reducer runs per action.

use tracing::warn;

use crate::models::Identified;

#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Identified> CollectionState<T> {
    /// A request left the station: loading on, stale error discarded.
    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Fetch succeeded: replace the mirror wholesale.
    pub fn fulfilled_replace(&mut self, items: Vec<T>) {
        self.loading = false;
        self.items = items;
    }

    /// Add succeeded: append the backend's copy of the new record.
    pub fn fulfilled_append(&mut self, item: T) {
        self.loading = false;
        self.items.push(item);
    }

    /// Update succeeded: swap the matching record in place. A record the
    /// backend accepted but the mirror never held leaves the list
    /// unchanged.
    pub fn fulfilled_update(&mut self, item: T) {
        self.loading = false;
        let id = item.id();
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => *slot = item,
            None => warn!("Updated record {} is not in the cached list", id),
        }
    }

    /// Delete succeeded: drop the matching record, and only it.
    pub fn fulfilled_delete(&mut self, id: i32) {
        self.loading = false;
        self.items.retain(|item| item.id() != id);
    }

    /// Request failed: record the display error, keep the cached items.
    pub fn rejected(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::author::Author;

    fn author(id: i32, name: &str) -> Author {
        Author {
            id,
            name: name.to_string(),
            bio: String::new(),
        }
    }

    #[test]
    fn pending_sets_loading_and_discards_stale_error() {
        let mut state = CollectionState::<Author>::default();
        state.rejected("boom".to_string());
        state.pending();
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn rejected_keeps_cached_items() {
        let mut state = CollectionState::default();
        state.fulfilled_replace(vec![author(1, "a"), author(2, "b")]);
        state.pending();
        state.rejected("backend down".to_string());
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.error.as_deref(), Some("backend down"));
        assert!(!state.loading);
    }

    #[test]
    fn update_swaps_only_the_matching_record() {
        let mut state = CollectionState::default();
        state.fulfilled_replace(vec![author(1, "a"), author(2, "b"), author(3, "c")]);
        state.fulfilled_update(author(2, "renamed"));
        assert_eq!(state.items[0], author(1, "a"));
        assert_eq!(state.items[1], author(2, "renamed"));
        assert_eq!(state.items[2], author(3, "c"));
    }

    #[test]
    fn update_miss_leaves_list_unchanged() {
        let mut state = CollectionState::default();
        state.fulfilled_replace(vec![author(1, "a")]);
        state.fulfilled_update(author(99, "ghost"));
        assert_eq!(state.items, vec![author(1, "a")]);
    }

    #[test]
    fn delete_removes_only_the_matching_id() {
        let mut state = CollectionState::default();
        state.fulfilled_replace(vec![author(1, "a"), author(42, "b"), author(43, "c")]);
        state.fulfilled_delete(42);
        let ids: Vec<i32> = state.items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 43]);
    }
}
