// HTTP client for the posts/comments API
//
// The remote service is a plain JSON REST API:
// - GET    /posts              (optionally filtered by userId)
// - GET    /comments?postId=N
// - POST   /comments           (returns the created comment with its id)
// - DELETE /comments/{id}
//
// Field names on the wire are camelCase; serde renames handle the mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A post as returned by the API. Immutable from this client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A comment attached to a post. The id is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// User-entered comment data before the server assigns identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Creation payload: a draft plus the post it targets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewComment<'a> {
    name: &'a str,
    email: &'a str,
    body: &'a str,
    post_id: u64,
}

/// Errors from the remote API
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Server answered with a non-success status
    Http { status: u16, message: String },
    /// Request never completed (DNS, connect, timeout)
    Network(String),
    /// Response body did not match the expected shape
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Client for the posts/comments service
///
/// Holds a single reqwest client (connection pool) and the base URL.
/// Cheap to clone if that ever becomes necessary; today one instance
/// lives on the network worker task.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given base URL
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Status triage shared by all requests
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch all posts, optionally restricted to one user
    pub async fn posts(&self, user_id: Option<u64>) -> Result<Vec<Post>, ApiError> {
        let mut request = self.client.get(self.url("/posts"));
        if let Some(user_id) = user_id {
            request = request.query(&[("userId", user_id)]);
        }

        let response = Self::check(request.send().await?).await?;
        let posts: Vec<Post> = response.json().await?;

        tracing::debug!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    /// Fetch the comments of one post, in server order
    pub async fn comments(&self, post_id: u64) -> Result<Vec<Comment>, ApiError> {
        let request = self
            .client
            .get(self.url("/comments"))
            .query(&[("postId", post_id)]);

        let response = Self::check(request.send().await?).await?;
        let comments: Vec<Comment> = response.json().await?;

        tracing::debug!("Fetched {} comments for post {}", comments.len(), post_id);
        Ok(comments)
    }

    /// Create a comment; the server assigns and returns the id
    pub async fn create_comment(
        &self,
        draft: &CommentDraft,
        post_id: u64,
    ) -> Result<Comment, ApiError> {
        let payload = NewComment {
            name: &draft.name,
            email: &draft.email,
            body: &draft.body,
            post_id,
        };

        let request = self.client.post(self.url("/comments")).json(&payload);
        let response = Self::check(request.send().await?).await?;
        let comment: Comment = response.json().await?;

        tracing::info!("Created comment {} on post {}", comment.id, post_id);
        Ok(comment)
    }

    /// Delete a comment by id
    pub async fn delete_comment(&self, id: u64) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&format!("/comments/{}", id)));
        Self::check(request.send().await?).await?;

        tracing::info!("Deleted comment {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("https://example.com/api/", 10).unwrap();
        assert_eq!(client.url("/posts"), "https://example.com/api/posts");
        assert_eq!(client.url("/comments/7"), "https://example.com/api/comments/7");
    }

    #[test]
    fn test_comment_wire_format() {
        let json = r#"{
            "id": 42,
            "postId": 5,
            "name": "A",
            "email": "a@x.com",
            "body": "hi"
        }"#;

        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.id, 42);
        assert_eq!(comment.post_id, 5);
        assert_eq!(comment.email, "a@x.com");
    }

    #[test]
    fn test_new_comment_payload_uses_camel_case() {
        let draft = CommentDraft {
            name: "A".into(),
            email: "a@x.com".into(),
            body: "hi".into(),
        };
        let payload = NewComment {
            name: &draft.name,
            email: &draft.email,
            body: &draft.body,
            post_id: 5,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["postId"], 5);
        assert!(value.get("post_id").is_none());
    }

    #[test]
    fn test_post_wire_format() {
        let json = r#"{"id": 1, "userId": 9, "title": "t", "body": "b"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.user_id, 9);
    }
}
