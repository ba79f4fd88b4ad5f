//! Blob storage port - upload-then-URL against the hosted bucket.

use async_trait::async_trait;

use crate::domain::MediaKind;

/// Destination namespaces inside the blob bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Avatars,
    Media,
}

impl MediaFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFolder::Avatars => "avatars",
            MediaFolder::Media => "media",
        }
    }
}

/// A file picked by the user, as handed over by the UI shell.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub filename: String,
    /// Declared MIME type; may be empty when the shell has none.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Media kind per the declared content type: `image/*` is an image,
    /// anything else is a video. Guesses from the filename when no type
    /// was declared.
    pub fn kind(&self) -> MediaKind {
        let declared = if self.content_type.is_empty() {
            mime_guess::from_path(&self.filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        } else {
            self.content_type.clone()
        };

        if declared.starts_with("image/") {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }
}

/// Blob storage trait - upload a file, get back its permanent public URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the file under the folder's namespace and return a publicly
    /// dereferenceable URL.
    async fn upload(&self, folder: MediaFolder, file: &MediaFile) -> Result<String, BlobError>;
}

/// Blob storage errors.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Connection failed: {0}")]
    Connection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_image_type_wins() {
        let file = MediaFile::new("clip.mp4", "image/png", vec![1]);
        assert_eq!(file.kind(), MediaKind::Image);
    }

    #[test]
    fn test_non_image_declared_type_is_video() {
        let file = MediaFile::new("photo.png", "application/octet-stream", vec![1]);
        assert_eq!(file.kind(), MediaKind::Video);
    }

    #[test]
    fn test_missing_type_falls_back_to_filename() {
        let file = MediaFile::new("photo.jpg", "", vec![1]);
        assert_eq!(file.kind(), MediaKind::Image);

        let file = MediaFile::new("clip.mov", "", vec![1]);
        assert_eq!(file.kind(), MediaKind::Video);
    }
}
