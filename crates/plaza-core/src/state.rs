//! Subscribable session state store.
//!
//! Session state is held behind an explicit get/set/subscribe interface so
//! UI shells and test harnesses observe the controller identically. The
//! controller is the single writer; everyone else reads snapshots.

use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::SessionState;

/// Single-writer state store over a [`watch`] channel.
pub struct StateStore {
    tx: watch::Sender<SessionState>,
}

impl StateStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx }
    }

    /// A clone of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Receiver that yields on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Mutate the state in place and notify subscribers.
    pub(crate) fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut SessionState),
    {
        self.tx.send_modify(mutate);
    }

    /// Issue a pending-operation token, held until the guard drops.
    pub(crate) fn begin(&self) -> OpGuard<'_> {
        let token = Uuid::new_v4();
        self.update(|state| {
            state.pending.insert(token);
        });
        OpGuard { store: self, token }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending-operation token. Surrendered on drop, so every exit path of an
/// operation - success, error, or panic - releases it.
pub(crate) struct OpGuard<'a> {
    store: &'a StateStore,
    token: Uuid,
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        let token = self.token;
        self.store.update(|state| {
            state.pending.remove(&token);
        });
    }
}
