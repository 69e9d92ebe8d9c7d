//! Optimistic update state machine.
//!
//! # Invariants
//! - The visible document is always either the optimistic one or the
//!   pre-mutation snapshot, never a mix.
//! - Transitions are pure: they consume the state and return the next one.

use crate::model::document::Document;
use crate::store::StoreError;

/// View state of the shared document around one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// Last mutation was persisted, or nothing was mutated yet.
    Clean(Document),
    /// Optimistic document is shown while its replace is in flight.
    Pending {
        optimistic: Document,
        previous: Document,
    },
    /// Replace failed; the snapshot taken before the mutation is shown.
    Failed {
        error: StoreError,
        previous: Document,
    },
}

impl Default for SyncState {
    fn default() -> Self {
        Self::Clean(Document::default())
    }
}

impl SyncState {
    /// Document currently shown to the user.
    pub fn view(&self) -> &Document {
        match self {
            Self::Clean(document) => document,
            Self::Pending { optimistic, .. } => optimistic,
            Self::Failed { previous, .. } => previous,
        }
    }

    pub fn into_view(self) -> Document {
        match self {
            Self::Clean(document) => document,
            Self::Pending { optimistic, .. } => optimistic,
            Self::Failed { previous, .. } => previous,
        }
    }

    /// Starts a mutation. The current view becomes the rollback snapshot.
    ///
    /// Starting while another mutation is pending builds on its optimistic
    /// document.
    pub fn begin(self, next: Document) -> Self {
        Self::Pending {
            optimistic: next,
            previous: self.into_view(),
        }
    }

    /// Marks the pending mutation as persisted.
    pub fn confirm(self) -> Self {
        match self {
            Self::Pending { optimistic, .. } => Self::Clean(optimistic),
            other => other,
        }
    }

    /// Reverts the pending mutation to its snapshot.
    pub fn rollback(self, error: StoreError) -> Self {
        match self {
            Self::Pending { previous, .. } => Self::Failed { error, previous },
            Self::Clean(previous) => Self::Failed { error, previous },
            Self::Failed { previous, .. } => Self::Failed { error, previous },
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Error of the last failed mutation, if the state is `Failed`.
    pub fn last_error(&self) -> Option<&StoreError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SyncState;
    use crate::model::document::{Document, Subject};
    use crate::store::StoreError;

    #[test]
    fn begin_then_confirm_shows_optimistic_document() {
        let next = Document::new(vec![Subject::new("Math")]);
        let state = SyncState::default().begin(next.clone());
        assert!(state.is_pending());
        assert_eq!(state.view(), &next);
        assert_eq!(state.confirm(), SyncState::Clean(next));
    }

    #[test]
    fn rollback_restores_snapshot() {
        let before = Document::new(vec![Subject::new("Math")]);
        let state = SyncState::Clean(before.clone())
            .begin(Document::default())
            .rollback(StoreError::Transport("offline".to_string()));

        assert_eq!(state.view(), &before);
        assert!(state.last_error().is_some());
    }

    #[test]
    fn second_begin_builds_on_optimistic_view() {
        let first = Document::new(vec![Subject::new("a")]);
        let second = Document::new(vec![Subject::new("b")]);
        let state = SyncState::default()
            .begin(first.clone())
            .begin(second.clone());

        match state {
            SyncState::Pending {
                optimistic,
                previous,
            } => {
                assert_eq!(optimistic, second);
                assert_eq!(previous, first);
            }
            other => panic!("expected pending, got {other:?}"),
        }
    }
}
