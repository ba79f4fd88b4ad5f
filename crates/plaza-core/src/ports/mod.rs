//! Ports - trait definitions for the remote backend.
//! These are the "interfaces" that infrastructure must implement.

mod blob;
mod store;

pub use blob::{BlobError, BlobStore, MediaFile, MediaFolder};
pub use store::{PostChanges, PostDraft, StoreError, StoreGateway};
