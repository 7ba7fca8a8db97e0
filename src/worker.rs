// Network worker task
//
// Owns the ApiClient and performs every remote call, keeping awaits off the
// render loop. Commands arrive on one mpsc channel, outcomes leave on
// another. Calls run sequentially: the UI is a single event loop and issues
// operations as discrete events, so there is nothing to parallelize.

use crate::api::ApiClient;
use crate::events::{ApiCommand, AppEvent};
use tokio::sync::mpsc;

pub async fn run(
    client: ApiClient,
    mut commands: mpsc::Receiver<ApiCommand>,
    events: mpsc::Sender<AppEvent>,
    user_id: Option<u64>,
) {
    while let Some(command) = commands.recv().await {
        let event = match command {
            ApiCommand::LoadPosts => AppEvent::PostsLoaded(client.posts(user_id).await),

            ApiCommand::LoadComments {
                post_id,
                generation,
            } => AppEvent::CommentsLoaded {
                generation,
                result: client.comments(post_id).await,
            },

            ApiCommand::CreateComment { post_id, draft } => {
                AppEvent::CommentCreated(client.create_comment(&draft, post_id).await)
            }

            ApiCommand::DeleteComment { id } => AppEvent::CommentDeleted {
                id,
                result: client.delete_comment(id).await,
            },
        };

        // Receiver gone means the TUI has shut down
        if events.send(event).await.is_err() {
            break;
        }
    }

    tracing::debug!("Network worker stopped");
}
