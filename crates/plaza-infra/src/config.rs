//! Backend configuration loaded from environment variables.

use std::env;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the hosted project, without a trailing slash.
    pub url: String,
    /// Anonymous API key, sent as both `apikey` and bearer token.
    pub anon_key: String,
    /// Blob bucket holding the `avatars/` and `media/` folders.
    pub bucket: String,
}

impl BackendConfig {
    /// Load configuration from the environment, reading a `.env` file
    /// first when present.
    ///
    /// Returns `None` when `SUPABASE_URL` or `SUPABASE_ANON_KEY` is unset;
    /// callers then fall back to the in-memory adapters.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("SUPABASE_URL").ok()?;
        let anon_key = env::var("SUPABASE_ANON_KEY").ok()?;
        let bucket = env::var("SUPABASE_BUCKET").unwrap_or_else(|_| "uploads".to_string());

        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            bucket,
        })
    }
}
