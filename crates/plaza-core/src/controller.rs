//! Session & feed state controller.
//!
//! Every mutation follows the reconciliation policy in [`crate::sync`]:
//! locally predictable writes apply optimistically and roll back to the
//! captured snapshot when the remote write fails; everything else holds a
//! pending token, writes first, and adopts or refetches the store's truth.
//! Failures are terminal for the invocation - there is no retry, and local
//! state always lands back on a previously-valid value.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Category, Comment, DEFAULT_AVATAR, Editing, Media, View};
use crate::error::Error;
use crate::ports::{
    BlobStore, MediaFile, MediaFolder, PostChanges, PostDraft, StoreGateway,
};
use crate::state::{OpGuard, StateStore};
use crate::sync::Operation;

/// Owns the session state and orchestrates every mutation against the
/// remote backend.
pub struct SessionController {
    store: StateStore,
    gateway: Arc<dyn StoreGateway>,
    blobs: Arc<dyn BlobStore>,
}

impl SessionController {
    pub fn new(gateway: Arc<dyn StoreGateway>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            store: StateStore::new(),
            gateway,
            blobs,
        }
    }

    /// The subscribable state store. Read-only from the outside; the
    /// controller is the single writer.
    pub fn state(&self) -> &StateStore {
        &self.store
    }

    fn begin(&self, op: Operation) -> Option<OpGuard<'_>> {
        op.tracks_loading().then(|| self.store.begin())
    }

    fn current_username(&self) -> Result<String, Error> {
        self.store
            .snapshot()
            .current_user
            .map(|user| user.username)
            .ok_or(Error::NoSession)
    }

    // ---- session ----------------------------------------------------

    /// Log in with a nickname, creating the user on first use.
    ///
    /// A zero-row lookup means "new user" and continues the flow; any
    /// other lookup failure aborts with no state change.
    pub async fn login(
        &self,
        username: &str,
        avatar_file: Option<MediaFile>,
    ) -> Result<(), Error> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::Validation("username must not be empty".to_string()));
        }
        let _op = self.begin(Operation::Login);

        let user = match self.gateway.find_user(username).await? {
            Some(existing) => {
                if let Some(file) = avatar_file {
                    let url = self.blobs.upload(MediaFolder::Avatars, &file).await?;
                    self.gateway.update_user_avatar(username, &url).await?
                } else {
                    existing
                }
            }
            None => {
                let avatar = match avatar_file {
                    Some(file) => self.blobs.upload(MediaFolder::Avatars, &file).await?,
                    None => DEFAULT_AVATAR.to_string(),
                };
                let created = self.gateway.create_user(username, &avatar).await?;
                self.store.update(|state| state.users.push(created.clone()));
                created
            }
        };

        tracing::info!(user = %user.username, "Session started");
        self.store.update(|state| state.current_user = Some(user));
        Ok(())
    }

    /// Clear the session. Pure local transition.
    pub fn logout(&self) {
        self.store.update(|state| state.current_user = None);
    }

    /// Fetch the user and post collections from the store.
    pub async fn refresh(&self) -> Result<(), Error> {
        let _op = self.begin(Operation::Refresh);

        let users = self.gateway.list_users().await?;
        let posts = self.gateway.list_posts().await?;
        self.store.update(|state| {
            state.users = users;
            state.posts = posts;
        });
        Ok(())
    }

    // ---- navigation & editing state ---------------------------------

    pub fn navigate(&self, view: View) {
        self.store.update(|state| state.view = view);
    }

    pub fn begin_edit_post(&self, post_id: i64) {
        self.store
            .update(|state| state.editing = Some(Editing::Post(post_id)));
    }

    pub fn begin_edit_comment(&self, post_id: i64, comment_id: i64) {
        self.store.update(|state| {
            state.editing = Some(Editing::Comment {
                post_id,
                comment_id,
            })
        });
    }

    pub fn begin_edit_profile(&self) -> Result<(), Error> {
        let username = self.current_username()?;
        self.store
            .update(|state| state.editing = Some(Editing::Profile(username)));
        Ok(())
    }

    pub fn cancel_edit(&self) {
        self.store.update(|state| state.editing = None);
    }

    // ---- optimistic mutations ---------------------------------------

    /// Toggle the current user's like on a post: added when absent,
    /// removed when present.
    pub async fn toggle_like(&self, post_id: i64) -> Result<(), Error> {
        let username = self.current_username()?;
        let post = self
            .store
            .snapshot()
            .post(post_id)
            .cloned()
            .ok_or(Error::NotFound {
                entity: "post",
                id: post_id.to_string(),
            })?;

        let prior = post.likes.clone();
        let likes = post.toggled_likes(&username);

        self.set_likes(post_id, likes.clone());
        let changes = PostChanges {
            likes: Some(likes),
            ..Default::default()
        };
        if let Err(err) = self.gateway.update_post(post_id, changes).await {
            tracing::warn!(post_id, error = %err, "Like update failed, rolling back");
            self.set_likes(post_id, prior);
            return Err(err.into());
        }
        Ok(())
    }

    /// Append a comment to a post's thread.
    pub async fn add_comment(&self, post_id: i64, text: &str) -> Result<(), Error> {
        let username = self.current_username()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation(
                "comment text must not be empty".to_string(),
            ));
        }

        let prior = self.comments_of(post_id)?;
        let mut comments = prior.clone();
        comments.push(Comment {
            id: Comment::allocate_id(&prior, Utc::now().timestamp_millis()),
            username,
            text: text.to_string(),
        });

        self.set_comments(post_id, comments.clone());
        let changes = PostChanges {
            comments: Some(comments),
            ..Default::default()
        };
        if let Err(err) = self.gateway.update_post(post_id, changes).await {
            tracing::warn!(post_id, error = %err, "Comment insert failed, rolling back");
            self.set_comments(post_id, prior);
            return Err(err.into());
        }
        Ok(())
    }

    /// Replace a comment's text. Author-only.
    pub async fn edit_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        text: &str,
    ) -> Result<(), Error> {
        let username = self.current_username()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation(
                "comment text must not be empty".to_string(),
            ));
        }

        let prior = self.comments_of(post_id)?;
        let target = prior
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or(Error::NotFound {
                entity: "comment",
                id: comment_id.to_string(),
            })?;
        if target.username != username {
            return Err(Error::Unauthorized);
        }

        let mut comments = prior.clone();
        for comment in comments.iter_mut() {
            if comment.id == comment_id {
                comment.text = text.to_string();
            }
        }

        self.set_comments(post_id, comments.clone());
        let changes = PostChanges {
            comments: Some(comments),
            ..Default::default()
        };
        match self.gateway.update_post(post_id, changes).await {
            Ok(()) => {
                self.store.update(|state| state.editing = None);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(post_id, comment_id, error = %err, "Comment edit failed, rolling back");
                self.set_comments(post_id, prior);
                Err(err.into())
            }
        }
    }

    // ---- store-assigned mutations -----------------------------------

    /// Publish a new post, then refetch the feed and navigate to it.
    pub async fn create_post(
        &self,
        content: &str,
        category: Category,
        media_file: Option<MediaFile>,
    ) -> Result<(), Error> {
        let username = self.current_username()?;
        let content = content.trim();
        if content.is_empty() && media_file.is_none() {
            return Err(Error::Validation(
                "a post needs text or an attachment".to_string(),
            ));
        }
        let _op = self.begin(Operation::CreatePost);

        let media = match media_file {
            Some(file) => {
                let kind = file.kind();
                let url = self.blobs.upload(MediaFolder::Media, &file).await?;
                Some(Media { url, kind })
            }
            None => None,
        };

        let created = self
            .gateway
            .create_post(PostDraft {
                user_id: username,
                content: content.to_string(),
                category,
                media,
            })
            .await?;
        tracing::debug!(post_id = created.id, "Post created");

        let posts = self.gateway.list_posts().await?;
        self.store.update(|state| {
            state.posts = posts;
            state.view = View::Feed;
        });
        Ok(())
    }

    /// Rewrite a post's content, category, and media. Author-only.
    ///
    /// `remove_media` wins over a new file; with neither, the stored media
    /// is left untouched.
    pub async fn edit_post(
        &self,
        post_id: i64,
        content: &str,
        category: Category,
        media_file: Option<MediaFile>,
        remove_media: bool,
    ) -> Result<(), Error> {
        let username = self.current_username()?;
        let post = self
            .store
            .snapshot()
            .post(post_id)
            .cloned()
            .ok_or(Error::NotFound {
                entity: "post",
                id: post_id.to_string(),
            })?;
        if post.user_id != username {
            return Err(Error::Unauthorized);
        }
        let _op = self.begin(Operation::EditPost);

        let media = if remove_media {
            Some(None)
        } else if let Some(file) = media_file {
            let kind = file.kind();
            let url = self.blobs.upload(MediaFolder::Media, &file).await?;
            Some(Some(Media { url, kind }))
        } else {
            None
        };

        let changes = PostChanges {
            content: Some(content.trim().to_string()),
            category: Some(category),
            media,
            ..Default::default()
        };
        self.gateway.update_post(post_id, changes).await?;

        let posts = self.gateway.list_posts().await?;
        self.store.update(|state| {
            state.posts = posts;
            state.editing = None;
        });
        Ok(())
    }

    /// Replace the current user's avatar. With no file this only clears
    /// the editing state.
    pub async fn edit_profile(&self, avatar_file: Option<MediaFile>) -> Result<(), Error> {
        let username = self.current_username()?;
        let Some(file) = avatar_file else {
            self.store.update(|state| state.editing = None);
            return Ok(());
        };
        let _op = self.begin(Operation::EditProfile);

        let url = self.blobs.upload(MediaFolder::Avatars, &file).await?;
        let stored = self.gateway.update_user_avatar(&username, &url).await?;

        // The store's returned row is the source of truth, not the value
        // we built the request from.
        self.store.update(|state| {
            if let Some(user) = state
                .users
                .iter_mut()
                .find(|u| u.username == stored.username)
            {
                *user = stored.clone();
            }
            state.current_user = Some(stored.clone());
            state.editing = None;
        });
        Ok(())
    }

    // ---- local patch helpers ----------------------------------------

    fn comments_of(&self, post_id: i64) -> Result<Vec<Comment>, Error> {
        self.store
            .snapshot()
            .post(post_id)
            .map(|post| post.comments.clone())
            .ok_or(Error::NotFound {
                entity: "post",
                id: post_id.to_string(),
            })
    }

    fn set_likes(&self, post_id: i64, likes: Vec<String>) {
        self.store.update(|state| {
            if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
                post.likes = likes;
            }
        });
    }

    fn set_comments(&self, post_id: i64, comments: Vec<Comment>) {
        self.store.update(|state| {
            if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
                post.comments = comments;
            }
        });
    }
}
