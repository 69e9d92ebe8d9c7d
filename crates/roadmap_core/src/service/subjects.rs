//! Subject-level operations.

use super::notice::Notice;
use super::workspace::{subject_mut, Workspace};
use super::{non_blank, normalize_name, WorkspaceError, WorkspaceResult};
use crate::model::document::{Subject, DEFAULT_SUBJECT_COLOR};
use crate::ordering::move_by_id;
use crate::store::{DocumentCache, RemoteStore};

impl<R: RemoteStore, C: DocumentCache> Workspace<R, C> {
    /// Appends a new subject. Blank `color` falls back to the default palette id.
    pub fn create_subject(
        &mut self,
        name: &str,
        color: Option<&str>,
        emoji: Option<&str>,
    ) -> WorkspaceResult<Subject> {
        let mut subject = Subject::new(normalize_name(name)?);
        subject.color = Some(non_blank(color).unwrap_or_else(|| DEFAULT_SUBJECT_COLOR.to_string()));
        subject.emoji = non_blank(emoji);

        let mut next = self.view().clone();
        next.subjects.push(subject.clone());
        self.commit("create_subject", next, Notice::save_failed)?;
        Ok(subject)
    }

    /// Replaces name, color and emoji of one subject.
    pub fn update_subject(
        &mut self,
        subject_id: &str,
        name: &str,
        color: Option<&str>,
        emoji: Option<&str>,
    ) -> WorkspaceResult<()> {
        let name = normalize_name(name)?;
        let mut next = self.view().clone();
        let subject = subject_mut(&mut next, subject_id)?;
        subject.name = name;
        subject.color = Some(non_blank(color).unwrap_or_else(|| DEFAULT_SUBJECT_COLOR.to_string()));
        subject.emoji = non_blank(emoji);
        self.commit("update_subject", next, Notice::save_failed)
    }

    /// Renames one subject, keeping color and emoji.
    pub fn rename_subject(&mut self, subject_id: &str, name: &str) -> WorkspaceResult<()> {
        let name = normalize_name(name)?;
        let mut next = self.view().clone();
        subject_mut(&mut next, subject_id)?.name = name;
        self.commit("rename_subject", next, Notice::save_failed)
    }

    /// Deletes one subject with its sections and topics.
    pub fn delete_subject(&mut self, subject_id: &str, confirmation: &str) -> WorkspaceResult<()> {
        self.check_confirmation(confirmation)?;
        if self.view().subject(subject_id).is_none() {
            return Err(WorkspaceError::SubjectNotFound(subject_id.to_string()));
        }

        let mut next = self.view().clone();
        next.subjects.retain(|subject| subject.id != subject_id);
        self.commit("delete_subject", next, Notice::delete_failed)
    }

    /// Moves subject `active_id` to the slot of `over_id`.
    ///
    /// Returns `Ok(false)` without persisting when the drop is a no-op.
    pub fn reorder_subjects(
        &mut self,
        active_id: &str,
        over_id: Option<&str>,
    ) -> WorkspaceResult<bool> {
        let Some(subjects) = move_by_id(&self.view().subjects, active_id, over_id) else {
            return Ok(false);
        };
        let mut next = self.view().clone();
        next.subjects = subjects;
        self.commit("reorder_subjects", next, Notice::save_failed)?;
        Ok(true)
    }
}
