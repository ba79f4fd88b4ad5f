//! Reconciliation policy - how each mutation squares local state with the
//! store once the remote call resolves.
//!
//! The split is decided by one question: can the client predict the
//! store's result? Likes, comments, and comment edits can be computed
//! locally, so they apply first and roll back exactly on failure. Post
//! creation and post edits involve store-assigned fields or uploads, so
//! they write first and refetch. Login and profile edits adopt the row the
//! store returns.

/// Remote mutations the controller can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Refresh,
    ToggleLike,
    AddComment,
    EditComment,
    CreatePost,
    EditPost,
    EditProfile,
}

/// How local state is reconciled with the remote outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Locally predictable: apply before the call, restore the captured
    /// snapshot on failure.
    Optimistic,
    /// Adopt the row returned by the store as the source of truth.
    FromResponse,
    /// Refetch the affected collection; the store assigns fields the
    /// client cannot compute.
    Refetch,
}

impl Operation {
    pub fn reconcile(self) -> Reconcile {
        match self {
            Operation::ToggleLike | Operation::AddComment | Operation::EditComment => {
                Reconcile::Optimistic
            }
            Operation::Login | Operation::EditProfile => Reconcile::FromResponse,
            Operation::Refresh | Operation::CreatePost | Operation::EditPost => Reconcile::Refetch,
        }
    }

    /// Whether the operation holds a pending token while in flight.
    /// Optimistic mutations render their effect immediately, so they never
    /// show as loading.
    pub fn tracks_loading(self) -> bool {
        self.reconcile() != Reconcile::Optimistic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table_is_pinned() {
        assert_eq!(Operation::ToggleLike.reconcile(), Reconcile::Optimistic);
        assert_eq!(Operation::AddComment.reconcile(), Reconcile::Optimistic);
        assert_eq!(Operation::EditComment.reconcile(), Reconcile::Optimistic);
        assert_eq!(Operation::CreatePost.reconcile(), Reconcile::Refetch);
        assert_eq!(Operation::EditPost.reconcile(), Reconcile::Refetch);
        assert_eq!(Operation::Refresh.reconcile(), Reconcile::Refetch);
        assert_eq!(Operation::Login.reconcile(), Reconcile::FromResponse);
        assert_eq!(Operation::EditProfile.reconcile(), Reconcile::FromResponse);
    }

    #[test]
    fn test_only_non_optimistic_operations_track_loading() {
        assert!(!Operation::ToggleLike.tracks_loading());
        assert!(!Operation::AddComment.tracks_loading());
        assert!(!Operation::EditComment.tracks_loading());
        assert!(Operation::Login.tracks_loading());
        assert!(Operation::Refresh.tracks_loading());
        assert!(Operation::CreatePost.tracks_loading());
        assert!(Operation::EditPost.tracks_loading());
        assert!(Operation::EditProfile.tracks_loading());
    }
}
