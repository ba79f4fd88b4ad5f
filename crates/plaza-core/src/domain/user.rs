use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Avatar assigned when a new user registers without an image.
pub const DEFAULT_AVATAR: &str = "🙂";

/// User entity - represents a registered nickname.
///
/// `username` is the primary key and is referenced by value from
/// `Post::user_id`, `Post::likes`, and `Comment::username`. Renaming is
/// deliberately unsupported: there is no rename operation anywhere in the
/// API, so those back-references stay valid for the lifetime of the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Either an emoji-like short string or an HTTPS URL to an uploaded image.
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a client-side timestamp.
    ///
    /// The authoritative `created_at` is store-assigned; this constructor is
    /// for adapters that play the store's role themselves.
    pub fn new(username: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            avatar: avatar.into(),
            created_at: Utc::now(),
        }
    }
}
