// Components module - the panels and overlays of the UI
//
// - Posts panel: selectable post list (the selected-post provider)
// - Details panel: post header + comments, write affordance / form
// - Comment form: draft composition
// - Title/status bars: shell chrome rendered in every frame
// - Toast: transient feedback overlay

pub mod comment_form;
pub mod post_details;
pub mod posts_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use comment_form::{CommentForm, FormAction};
pub use post_details::DetailsPanel;
pub use posts_panel::PostsPanel;
pub use toast::Toast;
