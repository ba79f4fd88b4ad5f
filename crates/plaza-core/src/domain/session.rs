use std::collections::HashSet;

use uuid::Uuid;

use super::{Post, User};

/// Navigable top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Feed,
    Create,
    Profile,
}

/// What the user is currently editing. At most one edit is active at a
/// time; beginning a new edit replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Editing {
    Post(i64),
    Comment { post_id: i64, comment_id: i64 },
    Profile(String),
}

/// The full client-visible session snapshot.
///
/// Owned and mutated exclusively by the controller through the
/// [`StateStore`](crate::state::StateStore); views read clones and
/// subscribe to changes.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub users: Vec<User>,
    /// Store-truth order: descending by `created_at`.
    pub posts: Vec<Post>,
    pub view: View,
    pub editing: Option<Editing>,
    /// Tokens of operations currently in flight. Each store-assigned
    /// mutation holds its own token, so overlapping operations never mask
    /// each other the way a single shared boolean would.
    pub pending: HashSet<Uuid>,
}

impl SessionState {
    /// Whether any tracked operation is in flight.
    pub fn loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn post(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }
}
