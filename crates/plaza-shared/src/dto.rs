//! Data Transfer Objects - rows and payloads as the remote store speaks them.
//!
//! Column names follow the consumed schema, which mixes snake_case
//! (`created_at`) with camelCase (`userId`, `mediaUrl`, `mediaType`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub username: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `users`. `created_at` is store-assigned.
#[derive(Debug, Clone, Serialize)]
pub struct UserInsert {
    pub username: String,
    pub avatar: String,
}

/// Partial update payload for a user's avatar.
#[derive(Debug, Clone, Serialize)]
pub struct AvatarPatch {
    pub avatar: String,
}

/// One element of a post's embedded `comments` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRow {
    pub id: i64,
    pub username: String,
    pub text: String,
}

/// A row of the `posts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRow {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub content: String,
    pub category: String,
    #[serde(rename = "mediaUrl")]
    pub media_url: Option<String>,
    #[serde(rename = "mediaType")]
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<CommentRow>,
}

/// Insert payload for `posts`. `id` and `created_at` are store-assigned.
#[derive(Debug, Clone, Serialize)]
pub struct PostInsert {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub content: String,
    pub category: String,
    #[serde(rename = "mediaUrl")]
    pub media_url: Option<String>,
    #[serde(rename = "mediaType")]
    pub media_type: Option<String>,
    pub likes: Vec<String>,
    pub comments: Vec<CommentRow>,
}

/// Partial update payload for `posts`.
///
/// An outer `None` omits the column from the request entirely; for the two
/// media columns an inner `None` serializes as an explicit `null`, which is
/// how the store clears them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostChangesRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "mediaUrl", skip_serializing_if = "Option::is_none")]
    pub media_url: Option<Option<String>>,
    #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentRow>>,
}
