//! User intents - the messages a view layer emits upward.
//!
//! Typed controller methods are the real surface; this enum is the single
//! funnel for shells that prefer to forward events as data.

use crate::controller::SessionController;
use crate::domain::{Category, View};
use crate::error::Error;
use crate::ports::MediaFile;

/// One user intention, as emitted by a view.
#[derive(Debug, Clone)]
pub enum Intent {
    Login {
        username: String,
        avatar: Option<MediaFile>,
    },
    Logout,
    Navigate(View),
    Refresh,
    ToggleLike {
        post_id: i64,
    },
    AddComment {
        post_id: i64,
        text: String,
    },
    CreatePost {
        content: String,
        category: Category,
        media: Option<MediaFile>,
    },
    BeginEditPost {
        post_id: i64,
    },
    BeginEditComment {
        post_id: i64,
        comment_id: i64,
    },
    BeginEditProfile,
    CancelEdit,
    EditPost {
        post_id: i64,
        content: String,
        category: Category,
        media: Option<MediaFile>,
        remove_media: bool,
    },
    EditComment {
        post_id: i64,
        comment_id: i64,
        text: String,
    },
    EditProfile {
        avatar: Option<MediaFile>,
    },
}

impl SessionController {
    /// Execute one intent against the controller.
    pub async fn dispatch(&self, intent: Intent) -> Result<(), Error> {
        match intent {
            Intent::Login { username, avatar } => self.login(&username, avatar).await,
            Intent::Logout => {
                self.logout();
                Ok(())
            }
            Intent::Navigate(view) => {
                self.navigate(view);
                Ok(())
            }
            Intent::Refresh => self.refresh().await,
            Intent::ToggleLike { post_id } => self.toggle_like(post_id).await,
            Intent::AddComment { post_id, text } => self.add_comment(post_id, &text).await,
            Intent::CreatePost {
                content,
                category,
                media,
            } => self.create_post(&content, category, media).await,
            Intent::BeginEditPost { post_id } => {
                self.begin_edit_post(post_id);
                Ok(())
            }
            Intent::BeginEditComment {
                post_id,
                comment_id,
            } => {
                self.begin_edit_comment(post_id, comment_id);
                Ok(())
            }
            Intent::BeginEditProfile => self.begin_edit_profile(),
            Intent::CancelEdit => {
                self.cancel_edit();
                Ok(())
            }
            Intent::EditPost {
                post_id,
                content,
                category,
                media,
                remove_media,
            } => {
                self.edit_post(post_id, &content, category, media, remove_media)
                    .await
            }
            Intent::EditComment {
                post_id,
                comment_id,
                text,
            } => self.edit_comment(post_id, comment_id, &text).await,
            Intent::EditProfile { avatar } => self.edit_profile(avatar).await,
        }
    }
}
