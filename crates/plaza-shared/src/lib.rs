//! # Plaza Shared
//!
//! Wire-format types for the hosted backend schema, shared between the
//! client core and the backend adapters.

pub mod dto;

pub use dto::{AvatarPatch, CommentRow, PostChangesRow, PostInsert, PostRow, UserInsert, UserRow};
