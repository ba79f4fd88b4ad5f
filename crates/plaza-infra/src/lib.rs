//! # Plaza Infrastructure
//!
//! Concrete implementations of the ports defined in `plaza-core`.
//! This crate contains the hosted-backend adapters, the in-memory
//! fallbacks, configuration loading, and telemetry setup.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All adapters enabled
//! - `minimal` - In-memory adapters only, no network dependencies
//! - `supabase` - Hosted backend adapters (PostgREST + blob storage)

use std::sync::Arc;

use plaza_core::SessionController;

pub mod config;
pub mod memory;
pub mod telemetry;

#[cfg(feature = "supabase")]
pub mod supabase;

pub use config::BackendConfig;
pub use memory::{InMemoryBlobStore, InMemoryStore};
pub use telemetry::{TelemetryConfig, init_telemetry};

#[cfg(feature = "supabase")]
pub use supabase::{SupabaseClient, SupabaseStorage, SupabaseStore};

/// Build a controller wired to the configured backend, falling back to the
/// in-memory adapters when the environment provides none.
pub fn build_controller() -> SessionController {
    #[cfg(feature = "supabase")]
    match BackendConfig::from_env() {
        Some(config) => match SupabaseClient::new(&config) {
            Ok(client) => {
                tracing::info!(url = %config.url, "Connected to hosted backend");
                return SessionController::new(
                    Arc::new(SupabaseStore::new(client.clone())),
                    Arc::new(SupabaseStorage::new(client)),
                );
            }
            Err(err) => {
                tracing::error!(
                    "Failed to build backend client: {}. Using in-memory fallback.",
                    err
                );
            }
        },
        None => {
            tracing::warn!("SUPABASE_URL not set. Running without backend (in-memory mode).");
        }
    }

    #[cfg(not(feature = "supabase"))]
    tracing::info!("Running without supabase feature - using in-memory adapters");

    SessionController::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(InMemoryBlobStore::new()),
    )
}

#[cfg(test)]
mod tests;
