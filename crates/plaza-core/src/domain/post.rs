use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post category tags. The wire value is the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    General,
    #[serde(rename = "Tecnología")]
    Tecnologia,
    Viajes,
    Comida,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Tecnologia,
        Category::Viajes,
        Category::Comida,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Tecnologia => "Tecnología",
            Category::Viajes => "Viajes",
            Category::Comida => "Comida",
        }
    }

    /// Parse a wire value back into a category.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Kind of an uploaded attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

/// An uploaded attachment.
///
/// The store persists this as two nullable columns (`mediaUrl`,
/// `mediaType`); holding them as one `Option<Media>` keeps the
/// both-or-neither invariant out of reach of partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    pub kind: MediaKind,
}

/// Comment entity - one entry of a post's comment thread.
///
/// `id` is unique within the parent post only, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub username: String,
    pub text: String,
}

impl Comment {
    /// Allocate an id for a new comment in `existing`.
    ///
    /// Ids are derived from the epoch-millisecond clock; when the clock
    /// value collides with (or trails) an id already present in the post,
    /// the allocator bumps past the current maximum. A single client can
    /// therefore never collide with itself, even when two comments land in
    /// the same millisecond. Two independent clients still can - that
    /// limitation lives in the store schema, not here.
    pub fn allocate_id(existing: &[Comment], now_ms: i64) -> i64 {
        let max = existing.iter().map(|c| c.id).max().unwrap_or(0);
        if now_ms > max { now_ms } else { max + 1 }
    }
}

/// Post entity - one feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    /// Author's username.
    pub user_id: String,
    /// Free text; may be empty only when `media` is present.
    pub content: String,
    pub category: Category,
    pub media: Option<Media>,
    pub created_at: DateTime<Utc>,
    /// Usernames that liked this post. Uniqueness is enforced by the
    /// controller's toggle, not by the store.
    pub likes: Vec<String>,
    /// Insertion order is chronological order.
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn liked_by(&self, username: &str) -> bool {
        self.likes.iter().any(|u| u == username)
    }

    /// Compute the like sequence after toggling `username`: removed when
    /// present, appended when absent.
    pub fn toggled_likes(&self, username: &str) -> Vec<String> {
        let mut likes = self.likes.clone();
        match likes.iter().position(|u| u == username) {
            Some(index) => {
                likes.remove(index);
            }
            None => likes.push(username.to_string()),
        }
        likes
    }
}
