//! `StoreGateway` implementation over the PostgREST API.

use async_trait::async_trait;

use plaza_core::domain::{Category, Comment, Media, MediaKind, Post, User};
use plaza_core::ports::{PostChanges, PostDraft, StoreError, StoreGateway};
use plaza_shared::dto::{AvatarPatch, CommentRow, PostChangesRow, PostInsert, PostRow, UserInsert, UserRow};

use super::client::{SupabaseClient, check};

/// PostgREST store gateway.
pub struct SupabaseStore {
    client: SupabaseClient,
}

impl SupabaseStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn user_from_row(row: UserRow) -> User {
    User {
        username: row.username,
        avatar: row.avatar,
        created_at: row.created_at,
    }
}

fn comment_from_row(row: CommentRow) -> Comment {
    Comment {
        id: row.id,
        username: row.username,
        text: row.text,
    }
}

fn comment_to_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id,
        username: comment.username.clone(),
        text: comment.text.clone(),
    }
}

/// Conversion from a wire row to the domain post. The two nullable media
/// columns collapse into `Option<Media>`; a half-set pair is a decode
/// error, not a post without media.
fn post_from_row(row: PostRow) -> Result<Post, StoreError> {
    let category = Category::parse(&row.category)
        .ok_or_else(|| StoreError::Decode(format!("unknown category: {}", row.category)))?;

    let media = match (row.media_url, row.media_type) {
        (Some(url), Some(kind)) => {
            let kind = MediaKind::parse(&kind)
                .ok_or_else(|| StoreError::Decode(format!("unknown media type: {kind}")))?;
            Some(Media { url, kind })
        }
        (None, None) => None,
        _ => {
            return Err(StoreError::Decode(
                "mediaUrl and mediaType must be set together".to_string(),
            ));
        }
    };

    Ok(Post {
        id: row.id,
        user_id: row.user_id,
        content: row.content,
        category,
        media,
        created_at: row.created_at,
        likes: row.likes,
        comments: row.comments.into_iter().map(comment_from_row).collect(),
    })
}

fn changes_to_row(changes: PostChanges) -> PostChangesRow {
    PostChangesRow {
        content: changes.content,
        category: changes.category.map(|c| c.as_str().to_string()),
        media_url: changes
            .media
            .as_ref()
            .map(|media| media.as_ref().map(|m| m.url.clone())),
        media_type: changes
            .media
            .map(|media| media.map(|m| m.kind.as_str().to_string())),
        likes: changes.likes,
        comments: changes
            .comments
            .map(|comments| comments.iter().map(comment_to_row).collect()),
    }
}

#[async_trait]
impl StoreGateway for SupabaseStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let response = self
            .client
            .http()
            .get(self.client.table_url("users"))
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let rows: Vec<UserRow> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(rows.into_iter().map(user_from_row).collect())
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        tracing::debug!(user = %username, "Finding user by username");

        let filter = format!("eq.{username}");
        let response = self
            .client
            .http()
            .get(self.client.table_url("users"))
            .query(&[("select", "*"), ("username", filter.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        // Zero rows is the expected "new user" outcome, not an error.
        let rows: Vec<UserRow> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(rows.into_iter().next().map(user_from_row))
    }

    async fn create_user(&self, username: &str, avatar: &str) -> Result<User, StoreError> {
        let payload = UserInsert {
            username: username.to_string(),
            avatar: avatar.to_string(),
        };
        let response = self
            .client
            .http()
            .post(self.client.table_url("users"))
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let rows: Vec<UserRow> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        rows.into_iter()
            .next()
            .map(user_from_row)
            .ok_or_else(|| StoreError::Decode("insert returned no representation".to_string()))
    }

    async fn update_user_avatar(&self, username: &str, avatar: &str) -> Result<User, StoreError> {
        let payload = AvatarPatch {
            avatar: avatar.to_string(),
        };
        let filter = format!("eq.{username}");
        let response = self
            .client
            .http()
            .patch(self.client.table_url("users"))
            .query(&[("username", filter.as_str())])
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let rows: Vec<UserRow> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        rows.into_iter()
            .next()
            .map(user_from_row)
            .ok_or(StoreError::NotFound)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let response = self
            .client
            .http()
            .get(self.client.table_url("posts"))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let rows: Vec<PostRow> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        rows.into_iter().map(post_from_row).collect()
    }

    async fn create_post(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let payload = PostInsert {
            user_id: draft.user_id,
            content: draft.content,
            category: draft.category.as_str().to_string(),
            media_url: draft.media.as_ref().map(|m| m.url.clone()),
            media_type: draft.media.map(|m| m.kind.as_str().to_string()),
            likes: Vec::new(),
            comments: Vec::new(),
        };
        let response = self
            .client
            .http()
            .post(self.client.table_url("posts"))
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let rows: Vec<PostRow> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no representation".to_string()))?;
        post_from_row(row)
    }

    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<(), StoreError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .http()
            .patch(self.client.table_url("posts"))
            .query(&[("id", filter.as_str())])
            .json(&changes_to_row(changes))
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        check(response).await?;
        Ok(())
    }
}
