//! Shared HTTP plumbing for the hosted backend.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use plaza_core::ports::StoreError;

use crate::config::BackendConfig;

/// Thin wrapper around [`reqwest::Client`] carrying the backend base URL,
/// bucket name, and auth headers.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        headers.insert("apikey", api_key);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
            bucket: config.bucket.clone(),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// PostgREST endpoint for a table.
    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Storage endpoint for an object path.
    pub(crate) fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    /// Permanent public URL for an object path.
    pub(crate) fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}

/// Map a non-success response into a typed store error.
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::CONFLICT {
        return Err(StoreError::Conflict(message));
    }
    Err(StoreError::Request {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(&BackendConfig {
            url: "https://example.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            bucket: "uploads".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_table_url() {
        assert_eq!(
            client().table_url("posts"),
            "https://example.supabase.co/rest/v1/posts"
        );
    }

    #[test]
    fn test_storage_urls() {
        let client = client();
        assert_eq!(
            client.object_url("media/1-a.png"),
            "https://example.supabase.co/storage/v1/object/uploads/media/1-a.png"
        );
        assert_eq!(
            client.public_url("media/1-a.png"),
            "https://example.supabase.co/storage/v1/object/public/uploads/media/1-a.png"
        );
    }
}
