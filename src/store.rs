// Comment store - loading state and comment list for the selected post
//
// State lifecycle:
//   initialize()        -> { loaded: false, has_error: false, items: [] }
//   fetch succeeds      -> { loaded: true,  has_error: false, items: [...] }
//   fetch fails         -> { loaded: true,  has_error: true,  items: [] }
//
// Items are only meaningful while loaded && !has_error.
//
// Two extra mechanisms beyond the plain state machine:
// - A generation counter. Every initialize() bumps it, and fetch results
//   carry the generation they were issued with. A result from before the
//   most recent initialize is discarded, so a slow fetch can never clobber
//   the comments of a newer selection.
// - A shadow copy for optimistic deletes. remove_local() records the removed
//   comment and its index; if the remote delete fails the comment is
//   restored at its original position.

use crate::api::{ApiError, Comment};
use std::collections::HashMap;

/// Comment-loading state for the currently selected post
#[derive(Debug, Clone, Default)]
pub struct CommentsState {
    /// The initial fetch has completed (successfully or not)
    pub loaded: bool,
    /// The initial fetch failed
    pub has_error: bool,
    /// Comments in server order
    pub items: Vec<Comment>,
}

/// Holder of comment state for the current post selection
#[derive(Debug, Default)]
pub struct CommentStore {
    pub state: CommentsState,

    /// Bumped on every initialize; stale fetch results are dropped
    generation: u64,

    /// Which post the current state belongs to (0 = none selected)
    post_id: u64,

    /// Optimistically removed comments awaiting remote confirmation,
    /// keyed by comment id, with the index they were removed from
    pending_deletes: HashMap<u64, (usize, Comment)>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin loading comments for a post
    ///
    /// Resets the state to not-loaded and invalidates any in-flight fetch.
    /// Returns the new generation; the caller issues the fetch with it.
    /// Safe to call repeatedly for the same post (re-fetch).
    pub fn initialize(&mut self, post_id: u64) -> u64 {
        self.state = CommentsState::default();
        self.post_id = post_id;
        self.pending_deletes.clear();
        self.generation += 1;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn post_id(&self) -> u64 {
        self.post_id
    }

    /// Apply a fetch result
    ///
    /// Returns false (and changes nothing) when the result belongs to a
    /// superseded generation.
    pub fn apply_fetch(
        &mut self,
        generation: u64,
        result: Result<Vec<Comment>, ApiError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Discarding stale comments fetch (generation {} != {})",
                generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(items) => {
                self.state = CommentsState {
                    loaded: true,
                    has_error: false,
                    items,
                };
            }
            Err(err) => {
                tracing::warn!("Comments fetch failed: {}", err);
                self.state = CommentsState {
                    loaded: true,
                    has_error: true,
                    items: Vec::new(),
                };
            }
        }
        true
    }

    /// Append a comment (called after the server confirmed creation)
    pub fn add_local(&mut self, comment: Comment) {
        self.state.items.push(comment);
    }

    /// Remove a comment immediately, keeping a shadow copy for restore
    ///
    /// Returns true if the comment was present.
    pub fn remove_local(&mut self, id: u64) -> bool {
        let Some(index) = self.state.items.iter().position(|c| c.id == id) else {
            return false;
        };

        let comment = self.state.items.remove(index);
        self.pending_deletes.insert(id, (index, comment));
        true
    }

    /// The remote delete succeeded; drop the shadow copy
    pub fn confirm_delete(&mut self, id: u64) {
        self.pending_deletes.remove(&id);
    }

    /// The remote delete failed; put the comment back where it was
    ///
    /// Returns true if there was a pending delete to restore.
    pub fn restore(&mut self, id: u64) -> bool {
        let Some((index, comment)) = self.pending_deletes.remove(&id) else {
            return false;
        };

        let index = index.min(self.state.items.len());
        self.state.items.insert(index, comment);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: u64, body: &str) -> Comment {
        Comment {
            id,
            post_id: 5,
            name: "A".into(),
            email: "a@x.com".into(),
            body: body.into(),
        }
    }

    #[test]
    fn test_initialize_resets_state() {
        let mut store = CommentStore::new();
        let gen = store.initialize(5);
        store.apply_fetch(gen, Ok(vec![comment(1, "hi")]));
        assert!(store.state.loaded);

        store.initialize(6);
        assert!(!store.state.loaded);
        assert!(!store.state.has_error);
        assert!(store.state.items.is_empty());
        assert_eq!(store.post_id(), 6);
    }

    #[test]
    fn test_fetch_success_and_order() {
        let mut store = CommentStore::new();
        let gen = store.initialize(5);
        store.apply_fetch(gen, Ok(vec![comment(3, "c"), comment(1, "a"), comment(2, "b")]));

        assert!(store.state.loaded);
        assert!(!store.state.has_error);
        // Server order preserved, not sorted by id
        let ids: Vec<u64> = store.state.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_fetch_failure_sets_error_flag() {
        let mut store = CommentStore::new();
        let gen = store.initialize(5);
        store.apply_fetch(gen, Err(ApiError::Network("boom".into())));

        assert!(store.state.loaded);
        assert!(store.state.has_error);
        assert!(store.state.items.is_empty());
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut store = CommentStore::new();
        let old_gen = store.initialize(5);
        let _new_gen = store.initialize(6);

        // Result for post 5 arrives after post 6 was selected
        let applied = store.apply_fetch(old_gen, Ok(vec![comment(1, "stale")]));
        assert!(!applied);
        assert!(!store.state.loaded);
        assert!(store.state.items.is_empty());
    }

    #[test]
    fn test_add_local_appends_at_end() {
        let mut store = CommentStore::new();
        let gen = store.initialize(5);
        store.apply_fetch(gen, Ok(vec![comment(1, "a")]));

        store.add_local(comment(42, "new"));
        assert_eq!(store.state.items.len(), 2);
        assert_eq!(store.state.items.last().unwrap().id, 42);
    }

    #[test]
    fn test_optimistic_remove_and_confirm() {
        let mut store = CommentStore::new();
        let gen = store.initialize(5);
        store.apply_fetch(gen, Ok(vec![comment(1, "a"), comment(2, "b")]));

        assert!(store.remove_local(1));
        assert_eq!(store.state.items.len(), 1);

        store.confirm_delete(1);
        // Confirmed: restore is a no-op
        assert!(!store.restore(1));
        assert_eq!(store.state.items.len(), 1);
    }

    #[test]
    fn test_restore_at_original_position() {
        let mut store = CommentStore::new();
        let gen = store.initialize(5);
        store.apply_fetch(
            gen,
            Ok(vec![comment(1, "a"), comment(2, "b"), comment(3, "c")]),
        );

        store.remove_local(2);
        assert!(store.restore(2));
        let ids: Vec<u64> = store.state.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_missing_comment_is_noop() {
        let mut store = CommentStore::new();
        let gen = store.initialize(5);
        store.apply_fetch(gen, Ok(vec![comment(1, "a")]));

        assert!(!store.remove_local(99));
        assert_eq!(store.state.items.len(), 1);
    }

    #[test]
    fn test_initialize_clears_pending_deletes() {
        let mut store = CommentStore::new();
        let gen = store.initialize(5);
        store.apply_fetch(gen, Ok(vec![comment(1, "a")]));
        store.remove_local(1);

        store.initialize(6);
        assert!(!store.restore(1));
    }
}
