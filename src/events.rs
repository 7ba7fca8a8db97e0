// Events that flow between the TUI event loop and the network worker
//
// The UI never awaits a network call directly: it sends an ApiCommand to the
// worker task and later receives an AppEvent with the outcome. Using enums
// keeps the channel protocol type-safe and pattern-matchable.

use crate::api::{ApiError, Comment, CommentDraft, Post};

/// Requests from the UI to the network worker
#[derive(Debug)]
pub enum ApiCommand {
    /// Fetch the post list (startup, or manual refresh)
    LoadPosts,

    /// Fetch comments for a post
    ///
    /// Carries the store generation it was issued with so a result that
    /// arrives after the selection changed can be discarded.
    LoadComments { post_id: u64, generation: u64 },

    /// Create a comment (confirm-then-apply: the UI mutates nothing until
    /// the created comment comes back)
    CreateComment { post_id: u64, draft: CommentDraft },

    /// Delete a comment (the UI has already removed it optimistically)
    DeleteComment { id: u64 },
}

/// Outcomes from the network worker to the UI
#[derive(Debug)]
pub enum AppEvent {
    PostsLoaded(Result<Vec<Post>, ApiError>),

    CommentsLoaded {
        generation: u64,
        result: Result<Vec<Comment>, ApiError>,
    },

    CommentCreated(Result<Comment, ApiError>),

    CommentDeleted {
        id: u64,
        result: Result<(), ApiError>,
    },
}
