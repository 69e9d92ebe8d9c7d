//! Workspace facade.
//!
//! # Responsibility
//! - Own the document client, the delete gate and the visible sync state.
//! - Provide the shared commit path used by every entity operation.

use super::delete_gate::DeleteGate;
use super::notice::Notice;
use super::sync_state::SyncState;
use super::{WorkspaceError, WorkspaceResult};
use crate::model::document::{Document, Section, Subject, Topic};
use crate::store::client::DocumentClient;
use crate::store::{DocumentCache, RemoteStore};
use log::{info, warn};
use std::time::Instant;

/// Single-document workspace with optimistic mutations.
pub struct Workspace<R: RemoteStore, C: DocumentCache> {
    client: DocumentClient<R, C>,
    gate: DeleteGate,
    state: SyncState,
    notices: Vec<Notice>,
}

impl<R: RemoteStore, C: DocumentCache> Workspace<R, C> {
    pub fn new(client: DocumentClient<R, C>, gate: DeleteGate) -> Self {
        Self {
            client,
            gate,
            state: SyncState::default(),
            notices: Vec::new(),
        }
    }

    /// Loads the document cache first; see `DocumentClient::load`.
    pub fn load(&mut self, on_cached: impl FnOnce(&Document)) -> &Document {
        let document = self.client.load(on_cached);
        self.state = SyncState::Clean(document);
        self.state.view()
    }

    /// Document currently shown to the user.
    pub fn view(&self) -> &Document {
        self.state.view()
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn client(&self) -> &DocumentClient<R, C> {
        &self.client
    }

    /// Drains pending user-visible notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(super) fn check_confirmation(&self, confirmation: &str) -> WorkspaceResult<()> {
        if self.gate.confirm(confirmation) {
            Ok(())
        } else {
            info!("event=delete_confirm module=service status=rejected");
            Err(WorkspaceError::ConfirmationRejected)
        }
    }

    /// Shows `next` optimistically and persists it.
    ///
    /// On failure the pre-mutation document is restored and `on_failure`
    /// is queued as the only notice for this operation.
    pub(super) fn commit(
        &mut self,
        operation: &'static str,
        next: Document,
        on_failure: fn() -> Notice,
    ) -> WorkspaceResult<()> {
        let started_at = Instant::now();
        self.state = std::mem::take(&mut self.state).begin(next);

        match self.client.replace(self.state.view()) {
            Ok(_) => {
                self.state = std::mem::take(&mut self.state).confirm();
                info!(
                    "event=document_commit module=service status=ok operation={operation} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=document_commit module=service status=error operation={operation} duration_ms={} error_code=persist_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                self.state = std::mem::take(&mut self.state).rollback(err.clone());
                self.notices.push(on_failure());
                Err(WorkspaceError::Persist(err))
            }
        }
    }
}

pub(super) fn subject_mut<'a>(
    document: &'a mut Document,
    subject_id: &str,
) -> WorkspaceResult<&'a mut Subject> {
    document
        .subjects
        .iter_mut()
        .find(|subject| subject.id == subject_id)
        .ok_or_else(|| WorkspaceError::SubjectNotFound(subject_id.to_string()))
}

pub(super) fn section_mut<'a>(
    document: &'a mut Document,
    subject_id: &str,
    section_id: &str,
) -> WorkspaceResult<&'a mut Section> {
    subject_mut(document, subject_id)?
        .sections
        .iter_mut()
        .find(|section| section.id == section_id)
        .ok_or_else(|| WorkspaceError::SectionNotFound(section_id.to_string()))
}

pub(super) fn topic_mut<'a>(
    document: &'a mut Document,
    subject_id: &str,
    section_id: &str,
    topic_id: &str,
) -> WorkspaceResult<&'a mut Topic> {
    section_mut(document, subject_id, section_id)?
        .topics
        .iter_mut()
        .find(|topic| topic.id == topic_id)
        .ok_or_else(|| WorkspaceError::TopicNotFound(topic_id.to_string()))
}
