//! In-memory store gateway - used as fallback when no backend is
//! configured, and as the test double for the controller's remote paths.
//!
//! Plays the store's role faithfully: assigns post ids and timestamps,
//! keeps the feed ordered by `created_at` descending, and rejects
//! duplicate usernames. Note: Data is lost on process restart.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use plaza_core::domain::{Post, User};
use plaza_core::ports::{PostChanges, PostDraft, StoreError, StoreGateway};

/// In-memory store using vecs behind async RwLocks.
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    posts: RwLock<Vec<Post>>,
    next_post_id: AtomicI64,
    calls: AtomicUsize,
    fail_next: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            posts: RwLock::new(Vec::new()),
            next_post_id: AtomicI64::new(0),
            calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Number of gateway calls issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Script the next gateway call to fail with a connection error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn gate(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Connection("injected failure".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreGateway for InMemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.gate()?;
        Ok(self.users.read().await.clone())
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.gate()?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, username: &str, avatar: &str) -> Result<User, StoreError> {
        self.gate()?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::Conflict(format!(
                "username {username} already exists"
            )));
        }

        let user = User::new(username, avatar);
        users.push(user.clone());
        tracing::debug!(user = %username, "User created");
        Ok(user)
    }

    async fn update_user_avatar(&self, username: &str, avatar: &str) -> Result<User, StoreError> {
        self.gate()?;
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(StoreError::NotFound)?;
        user.avatar = avatar.to_string();
        Ok(user.clone())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.gate()?;
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn create_post(&self, draft: PostDraft) -> Result<Post, StoreError> {
        self.gate()?;
        let post = Post {
            id: self.next_post_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: draft.user_id,
            content: draft.content,
            category: draft.category,
            media: draft.media,
            created_at: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
        };
        self.posts.write().await.push(post.clone());
        tracing::debug!(post_id = post.id, "Post created");
        Ok(post)
    }

    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<(), StoreError> {
        self.gate()?;
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(category) = changes.category {
            post.category = category;
        }
        if let Some(media) = changes.media {
            post.media = media;
        }
        if let Some(likes) = changes.likes {
            post.likes = likes;
        }
        if let Some(comments) = changes.comments {
            post.comments = comments;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_core::domain::Category;

    #[tokio::test]
    async fn test_duplicate_username_is_a_conflict() {
        let store = InMemoryStore::new();
        store.create_user("ana", "🙂").await.unwrap();

        let result = store.create_user("ana", "🙂").await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_posts_list_newest_first() {
        let store = InMemoryStore::new();
        for content in ["uno", "dos"] {
            store
                .create_post(PostDraft {
                    user_id: "ana".to_string(),
                    content: content.to_string(),
                    category: Category::General,
                    media: None,
                })
                .await
                .unwrap();
        }

        let posts = store.list_posts().await.unwrap();
        assert!(posts[0].created_at >= posts[1].created_at);
    }

    #[tokio::test]
    async fn test_injected_failure_fires_once() {
        let store = InMemoryStore::new();
        store.fail_next();

        assert!(store.list_users().await.is_err());
        assert!(store.list_users().await.is_ok());
        assert_eq!(store.calls(), 2);
    }
}
