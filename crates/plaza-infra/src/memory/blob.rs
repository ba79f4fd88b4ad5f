//! In-memory blob store - keeps uploads in a map and hands back fake but
//! well-formed public URLs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use plaza_core::ports::{BlobError, BlobStore, MediaFile, MediaFolder};

/// In-memory blob store.
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, folder: MediaFolder, file: &MediaFile) -> Result<String, BlobError> {
        if file.bytes.is_empty() {
            return Err(BlobError::Upload("empty file".to_string()));
        }

        let path = format!(
            "{}/{}-{}",
            folder.as_str(),
            Utc::now().timestamp_millis(),
            file.filename
        );
        self.objects
            .write()
            .await
            .insert(path.clone(), file.bytes.clone());

        Ok(format!("https://blobs.invalid/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_stores_and_returns_url() {
        let blobs = InMemoryBlobStore::new();
        let file = MediaFile::new("me.png", "image/png", vec![1, 2]);

        let url = blobs.upload(MediaFolder::Avatars, &file).await.unwrap();
        assert!(url.starts_with("https://blobs.invalid/avatars/"));
        assert!(url.ends_with("-me.png"));
        assert_eq!(blobs.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let blobs = InMemoryBlobStore::new();
        let file = MediaFile::new("me.png", "image/png", Vec::new());

        assert!(blobs.upload(MediaFolder::Avatars, &file).await.is_err());
        assert!(blobs.is_empty().await);
    }
}
