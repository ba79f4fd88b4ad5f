//! `BlobStore` implementation over the hosted storage API.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;

use plaza_core::ports::{BlobError, BlobStore, MediaFile, MediaFolder};

use super::client::SupabaseClient;

/// Hosted blob storage.
pub struct SupabaseStorage {
    client: SupabaseClient,
}

impl SupabaseStorage {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Object path: folder namespace, epoch-millis prefix, original
    /// filename with path separators stripped.
    fn object_path(folder: MediaFolder, filename: &str, now_ms: i64) -> String {
        let safe = filename.replace(['/', '\\'], "_");
        format!("{}/{}-{}", folder.as_str(), now_ms, safe)
    }
}

#[async_trait]
impl BlobStore for SupabaseStorage {
    async fn upload(&self, folder: MediaFolder, file: &MediaFile) -> Result<String, BlobError> {
        if file.bytes.is_empty() {
            return Err(BlobError::Upload("empty file".to_string()));
        }

        let path = Self::object_path(folder, &file.filename, Utc::now().timestamp_millis());
        let content_type = if file.content_type.is_empty() {
            "application/octet-stream"
        } else {
            file.content_type.as_str()
        };

        let response = self
            .client
            .http()
            .post(self.client.object_url(&path))
            .header(CONTENT_TYPE, content_type)
            .body(file.bytes.clone())
            .send()
            .await
            .map_err(|e| BlobError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BlobError::Upload(format!("status {status}: {message}")));
        }

        tracing::debug!(path = %path, size = file.bytes.len(), "Uploaded blob");
        Ok(self.client.public_url(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_is_timestamped_and_namespaced() {
        let path = SupabaseStorage::object_path(MediaFolder::Avatars, "me.png", 1_700_000_000_000);
        assert_eq!(path, "avatars/1700000000000-me.png");
    }

    #[test]
    fn test_object_path_strips_separators() {
        let path = SupabaseStorage::object_path(MediaFolder::Media, "../a/b.png", 5);
        assert_eq!(path, "media/5-.._a_b.png");
    }
}
