//! # Plaza Core
//!
//! The domain layer of the Plaza social-feed client.
//! This crate contains the entities, the ports onto the remote backend, and
//! the session controller with its optimistic-update protocol. It has zero
//! infrastructure dependencies; adapters live in `plaza-infra`.

pub mod controller;
pub mod domain;
pub mod error;
pub mod intent;
pub mod ports;
pub mod state;
pub mod sync;

pub use controller::SessionController;
pub use error::Error;
pub use intent::Intent;
pub use state::StateStore;
