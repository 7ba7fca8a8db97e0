// TUI application state
//
// App owns the posts, the comment store, the panels, and the command channel
// to the network worker. Remote operations follow two different orderings:
//
// - Comment creation is confirm-then-apply: nothing is mutated locally
//   until the server returns the created comment with its id.
// - Comment deletion is optimistic: the comment disappears immediately and
//   is restored (with an error toast) if the remote call fails.

use super::components::{CommentForm, DetailsPanel, PostsPanel, Toast};
use crate::api::{CommentDraft, Post};
use crate::events::{ApiCommand, AppEvent};
use crate::logging::LogBuffer;
use crate::store::CommentStore;
use crate::theme::Theme;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Which panel receives navigation input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Posts,
    Details,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Posts => Self::Details,
            Self::Details => Self::Posts,
        }
    }
}

/// Debounce duration for action keys (Enter, d, w)
/// Prevents rapid-fire triggers on terminals that don't send release events
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// Main application state for the TUI
pub struct App {
    /// All posts fetched at startup
    pub posts: Vec<Post>,

    /// Post-list fetch in flight
    pub posts_loading: bool,

    /// Post-list fetch failure, if any
    pub posts_error: Option<String>,

    /// Id of the post whose details are open (None = nothing selected)
    pub selected_post_id: Option<u64>,

    /// Comment state for the selected post
    pub store: CommentStore,

    /// Whether the composition form is shown instead of the write affordance
    pub form_visible: bool,

    pub posts_panel: PostsPanel,
    pub details_panel: DetailsPanel,
    pub form: CommentForm,

    pub focus: Focus,
    pub toast: Option<Toast>,
    pub should_quit: bool,

    pub log_buffer: LogBuffer,
    pub theme: Theme,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Animation frame counter (for the loading spinner)
    pub animation_frame: usize,

    /// Channel to the network worker
    commands: mpsc::Sender<ApiCommand>,

    /// Last time an action key was triggered (for debouncing)
    last_action_time: Option<Instant>,
}

impl App {
    pub fn new(log_buffer: LogBuffer, theme: Theme, commands: mpsc::Sender<ApiCommand>) -> Self {
        Self {
            posts: Vec::new(),
            posts_loading: false,
            posts_error: None,
            selected_post_id: None,
            store: CommentStore::new(),
            form_visible: false,
            posts_panel: PostsPanel::new(),
            details_panel: DetailsPanel::new(),
            form: CommentForm::new(),
            focus: Focus::default(),
            toast: None,
            should_quit: false,
            log_buffer,
            theme,
            start_time: Instant::now(),
            animation_frame: 0,
            commands,
            last_action_time: None,
        }
    }

    /// The selected post, if it is still in the list
    pub fn selected_post(&self) -> Option<&Post> {
        let id = self.selected_post_id?;
        self.posts.iter().find(|p| p.id == id)
    }

    /// Kick off the initial loads (posts, and comments for "no selection")
    pub fn start(&mut self) {
        self.posts_loading = true;
        self.send(ApiCommand::LoadPosts);
        // Initial mount counts as a selection change
        self.select_post(None);
    }

    /// Selected-post change (including the initial mount)
    ///
    /// Hides the form, resets the draft and comment cursor, and restarts the
    /// comment load. Safe to call again for the same post: the re-fetch just
    /// supersedes the previous generation.
    pub fn select_post(&mut self, post_id: Option<u64>) {
        self.form_visible = false;
        self.form.reset();
        self.details_panel.reset();
        self.selected_post_id = post_id;

        let post_id = post_id.unwrap_or(0);
        let generation = self.store.initialize(post_id);
        self.send(ApiCommand::LoadComments {
            post_id,
            generation,
        });
    }

    /// Re-fetch the comments of the current selection
    pub fn reload_comments(&mut self) {
        self.select_post(self.selected_post_id);
    }

    /// Submit a draft (confirm-then-apply)
    ///
    /// The list is not touched here; the append happens in `apply_event`
    /// once the server returns the created comment.
    pub fn submit_comment(&mut self, draft: CommentDraft) {
        let post_id = self.selected_post_id.unwrap_or(0);
        self.form.submitting = true;
        self.form.error = None;
        self.send(ApiCommand::CreateComment { post_id, draft });
    }

    /// Delete the comment under the cursor (optimistic)
    pub fn delete_selected_comment(&mut self) {
        let Some(idx) = self.details_panel.cursor else {
            return;
        };
        let Some(comment) = self.store.state.items.get(idx) else {
            return;
        };
        let id = comment.id;

        // Local removal happens before the remote call returns
        if self.store.remove_local(id) {
            self.send(ApiCommand::DeleteComment { id });
        }
    }

    /// Show the composition form (only meaningful when comments rendered)
    pub fn open_form(&mut self) {
        if self.store.state.loaded && !self.store.state.has_error {
            self.form_visible = true;
            self.focus = Focus::Details;
        }
    }

    /// Hide the composition form
    pub fn close_form(&mut self) {
        self.form_visible = false;
    }

    /// Apply an outcome from the network worker
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PostsLoaded(result) => {
                self.posts_loading = false;
                match result {
                    Ok(posts) => {
                        tracing::info!("Loaded {} posts", posts.len());
                        self.posts = posts;
                        self.posts_error = None;
                    }
                    Err(err) => {
                        tracing::error!("Posts fetch failed: {}", err);
                        self.posts_error = Some(err.to_string());
                    }
                }
            }

            AppEvent::CommentsLoaded { generation, result } => {
                // Stale generations are dropped inside the store
                self.store.apply_fetch(generation, result);
            }

            AppEvent::CommentCreated(result) => match result {
                Ok(comment) => {
                    self.store.add_local(comment);
                    self.form.submitted();
                    self.show_toast(Toast::new("✓ Comment added"));
                }
                Err(err) => {
                    tracing::warn!("Comment creation failed: {}", err);
                    self.form.submit_failed(err.to_string());
                    self.show_toast(Toast::error("✗ Failed to add comment"));
                }
            },

            AppEvent::CommentDeleted { id, result } => match result {
                Ok(()) => self.store.confirm_delete(id),
                Err(err) => {
                    tracing::warn!("Comment delete failed: {}", err);
                    if self.store.restore(id) {
                        self.show_toast(Toast::error("✗ Delete failed, comment restored"));
                    }
                }
            },
        }
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    /// Advance animations and expire the toast (called on every tick)
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    /// Spinner character for the current animation frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    /// Check if an action key should be debounced
    /// Returns true if the action should be blocked (too soon since last)
    pub fn should_debounce_action(&mut self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_action_time {
            if now.duration_since(last) < ACTION_DEBOUNCE {
                return true;
            }
        }
        self.last_action_time = Some(now);
        false
    }

    fn send(&self, command: ApiCommand) {
        // Bounded channel; if the worker is that far behind, dropping the
        // command and logging beats blocking the render loop
        if let Err(e) = self.commands.try_send(command) {
            tracing::error!("Command channel full or closed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Comment};

    fn test_app() -> (App, mpsc::Receiver<ApiCommand>) {
        let (tx, rx) = mpsc::channel(64);
        let app = App::new(LogBuffer::new(), Theme::auto(), tx);
        (app, rx)
    }

    fn comment(id: u64) -> Comment {
        Comment {
            id,
            post_id: 5,
            name: "A".into(),
            email: "a@x.com".into(),
            body: "hi".into(),
        }
    }

    fn load_comments(app: &mut App, comments: Vec<Comment>) {
        let generation = app.store.generation();
        app.apply_event(AppEvent::CommentsLoaded {
            generation,
            result: Ok(comments),
        });
    }

    #[test]
    fn test_select_post_resets_form_and_reloads() {
        let (mut app, mut rx) = test_app();
        app.select_post(Some(5));
        load_comments(&mut app, vec![]);
        app.open_form();
        assert!(app.form_visible);

        app.select_post(Some(6));
        assert!(!app.form_visible);
        assert!(!app.store.state.loaded); // Loading indicator condition again
        assert_eq!(app.store.post_id(), 6);

        // Both selections issued a LoadComments command
        let mut loads = 0;
        while let Ok(cmd) = rx.try_recv() {
            if matches!(cmd, ApiCommand::LoadComments { .. }) {
                loads += 1;
            }
        }
        assert_eq!(loads, 2);
    }

    #[test]
    fn test_no_selection_loads_post_zero() {
        let (mut app, mut rx) = test_app();
        app.select_post(None);

        match rx.try_recv().unwrap() {
            ApiCommand::LoadComments { post_id, .. } => assert_eq!(post_id, 0),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_submit_mutates_nothing_until_confirmed() {
        let (mut app, mut rx) = test_app();
        app.select_post(Some(5));
        load_comments(&mut app, vec![comment(1)]);

        app.submit_comment(CommentDraft {
            name: "A".into(),
            email: "a@x.com".into(),
            body: "hi".into(),
        });
        // Remote creation happens-before local list mutation
        assert_eq!(app.store.state.items.len(), 1);
        assert!(app.form.submitting);

        let created = Comment {
            id: 42, // Server-assigned
            ..comment(0)
        };
        app.apply_event(AppEvent::CommentCreated(Ok(created)));
        assert_eq!(app.store.state.items.len(), 2);
        assert_eq!(app.store.state.items.last().unwrap().id, 42);

        // The draft went out with the selected post id
        let sent = loop {
            match rx.try_recv().unwrap() {
                ApiCommand::CreateComment { post_id, .. } => break post_id,
                _ => continue,
            }
        };
        assert_eq!(sent, 5);
    }

    #[test]
    fn test_failed_create_leaves_list_untouched() {
        let (mut app, _rx) = test_app();
        app.select_post(Some(5));
        load_comments(&mut app, vec![comment(1)]);

        app.submit_comment(CommentDraft::default());
        app.apply_event(AppEvent::CommentCreated(Err(ApiError::Network(
            "boom".into(),
        ))));

        assert_eq!(app.store.state.items.len(), 1);
        assert!(app.form.error.is_some());
        assert!(!app.form.submitting);
    }

    #[test]
    fn test_delete_is_optimistic_and_restores_on_failure() {
        let (mut app, mut rx) = test_app();
        app.select_post(Some(5));
        load_comments(&mut app, vec![comment(1), comment(2)]);
        app.details_panel.sync(2, 30);
        app.details_panel.cursor = Some(0);

        app.delete_selected_comment();
        // Removed before any remote outcome
        assert_eq!(app.store.state.items.len(), 1);
        let deleted_id = loop {
            match rx.try_recv().unwrap() {
                ApiCommand::DeleteComment { id } => break id,
                _ => continue,
            }
        };
        assert_eq!(deleted_id, 1);

        app.apply_event(AppEvent::CommentDeleted {
            id: 1,
            result: Err(ApiError::Network("boom".into())),
        });
        // Restored at its original position, with a toast
        assert_eq!(app.store.state.items[0].id, 1);
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_delete_success_is_silent() {
        let (mut app, _rx) = test_app();
        app.select_post(Some(5));
        load_comments(&mut app, vec![comment(1)]);
        app.details_panel.sync(1, 30);
        app.details_panel.cursor = Some(0);

        app.delete_selected_comment();
        app.apply_event(AppEvent::CommentDeleted {
            id: 1,
            result: Ok(()),
        });

        assert!(app.store.state.items.is_empty());
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_stale_comments_result_is_dropped() {
        let (mut app, _rx) = test_app();
        app.select_post(Some(5));
        let old_generation = app.store.generation();
        app.select_post(Some(6));

        app.apply_event(AppEvent::CommentsLoaded {
            generation: old_generation,
            result: Ok(vec![comment(1)]),
        });
        assert!(!app.store.state.loaded);
        assert!(app.store.state.items.is_empty());
    }

    #[test]
    fn test_form_requires_loaded_error_free_comments() {
        let (mut app, _rx) = test_app();
        app.select_post(Some(5));

        // Not loaded yet: the affordance is unavailable
        app.open_form();
        assert!(!app.form_visible);

        let generation = app.store.generation();
        app.apply_event(AppEvent::CommentsLoaded {
            generation,
            result: Err(ApiError::Network("boom".into())),
        });
        app.open_form();
        assert!(!app.form_visible);

        app.reload_comments();
        load_comments(&mut app, vec![]);
        app.open_form();
        assert!(app.form_visible);
    }
}
