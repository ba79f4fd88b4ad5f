//! Controller-surface error types.

use thiserror::Error;

use crate::ports::{BlobError, StoreError};

/// Errors surfaced by the session controller.
///
/// `Validation` is issued before any remote call and guarantees that no
/// state was touched; a UI shell may swallow it to reproduce the silent
/// intent-boundary behavior. `Store` and `Blob` always leave (or restore)
/// local state at its last known-good value.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No active session")]
    NoSession,

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Upload error: {0}")]
    Blob(#[from] BlobError),
}
