//! Section-level operations.

use super::notice::Notice;
use super::workspace::{section_mut, subject_mut, Workspace};
use super::{normalize_name, WorkspaceError, WorkspaceResult};
use crate::model::document::Section;
use crate::ordering::move_by_id;
use crate::store::{DocumentCache, RemoteStore};

impl<R: RemoteStore, C: DocumentCache> Workspace<R, C> {
    /// Appends a new empty section to a subject.
    pub fn create_section(&mut self, subject_id: &str, name: &str) -> WorkspaceResult<Section> {
        let section = Section::new(normalize_name(name)?);
        let mut next = self.view().clone();
        subject_mut(&mut next, subject_id)?
            .sections
            .push(section.clone());
        self.commit("create_section", next, Notice::save_failed)?;
        Ok(section)
    }

    pub fn rename_section(
        &mut self,
        subject_id: &str,
        section_id: &str,
        name: &str,
    ) -> WorkspaceResult<()> {
        let name = normalize_name(name)?;
        let mut next = self.view().clone();
        section_mut(&mut next, subject_id, section_id)?.name = name;
        self.commit("rename_section", next, Notice::save_failed)
    }

    /// Deletes one section with its topics.
    pub fn delete_section(
        &mut self,
        subject_id: &str,
        section_id: &str,
        confirmation: &str,
    ) -> WorkspaceResult<()> {
        self.check_confirmation(confirmation)?;
        let mut next = self.view().clone();
        let subject = subject_mut(&mut next, subject_id)?;
        if subject.section(section_id).is_none() {
            return Err(WorkspaceError::SectionNotFound(section_id.to_string()));
        }
        subject.sections.retain(|section| section.id != section_id);
        self.commit("delete_section", next, Notice::delete_failed)
    }

    /// Moves section `active_id` to the slot of `over_id` within a subject.
    pub fn reorder_sections(
        &mut self,
        subject_id: &str,
        active_id: &str,
        over_id: Option<&str>,
    ) -> WorkspaceResult<bool> {
        let mut next = self.view().clone();
        let subject = subject_mut(&mut next, subject_id)?;
        let Some(sections) = move_by_id(&subject.sections, active_id, over_id) else {
            return Ok(false);
        };
        subject.sections = sections;
        self.commit("reorder_sections", next, Notice::save_failed)?;
        Ok(true)
    }
}
