use async_trait::async_trait;

use crate::domain::{Category, Comment, Media, Post, User};

/// New post payload. The store assigns `id` and `created_at`; likes and
/// comments start empty.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub user_id: String,
    pub content: String,
    pub category: Category,
    pub media: Option<Media>,
}

/// Partial post update.
///
/// `None` leaves a field untouched. For `media`, `Some(None)` clears both
/// stored columns together.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub content: Option<String>,
    pub category: Option<Category>,
    pub media: Option<Option<Media>>,
    pub likes: Option<Vec<String>>,
    pub comments: Option<Vec<Comment>>,
}

/// Gateway onto the remote relational store.
///
/// All operations are network calls that may fail; none are transactional
/// across collections.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Look up a user by username. Zero rows is `Ok(None)`, never an error.
    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Create a user. Fails with [`StoreError::Conflict`] if the username
    /// already exists.
    async fn create_user(&self, username: &str, avatar: &str) -> Result<User, StoreError>;

    /// Update a user's avatar and return the stored row.
    async fn update_user_avatar(&self, username: &str, avatar: &str) -> Result<User, StoreError>;

    /// List all posts, ordered by `created_at` descending.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    async fn create_post(&self, draft: PostDraft) -> Result<Post, StoreError>;

    /// Apply a partial update to the post with the given id.
    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<(), StoreError>;
}

/// Store gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    #[error("Response decoding failed: {0}")]
    Decode(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Conflict(String),
}
