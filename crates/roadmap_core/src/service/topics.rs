//! Topic-level operations.

use super::notice::Notice;
use super::workspace::{section_mut, topic_mut, Workspace};
use super::{non_blank, normalize_name, parse_tags, WorkspaceError, WorkspaceResult};
use crate::markup::edit::RichTextDraft;
use crate::model::document::{Priority, Topic};
use crate::ordering::move_by_id;
use crate::store::{DocumentCache, RemoteStore};

/// Metadata edited outside the topic name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicDetails {
    pub note: Option<String>,
    pub link: Option<String>,
    pub priority: Option<Priority>,
    /// Free-form tag input, parsed with `parse_tags`.
    pub tags_input: String,
}

impl TopicDetails {
    /// Pre-fills the edit form from a stored topic.
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            note: topic.note.clone(),
            link: topic.link.clone(),
            priority: topic.priority,
            tags_input: topic.tags.join(" "),
        }
    }
}

impl<R: RemoteStore, C: DocumentCache> Workspace<R, C> {
    /// Appends a topic built from a rich-text draft.
    pub fn create_topic(
        &mut self,
        subject_id: &str,
        section_id: &str,
        draft: RichTextDraft,
    ) -> WorkspaceResult<Topic> {
        let mut topic = Topic::new(normalize_name(&draft.text)?);
        topic.images = draft.images;
        topic.links = draft.links;

        let mut next = self.view().clone();
        section_mut(&mut next, subject_id, section_id)?
            .topics
            .push(topic.clone());
        self.commit("create_topic", next, Notice::save_failed)?;
        Ok(topic)
    }

    /// Replaces name, images and links of one topic from an edited draft.
    pub fn update_topic(
        &mut self,
        subject_id: &str,
        section_id: &str,
        topic_id: &str,
        draft: RichTextDraft,
    ) -> WorkspaceResult<()> {
        let name = normalize_name(&draft.text)?;
        let mut next = self.view().clone();
        let topic = topic_mut(&mut next, subject_id, section_id, topic_id)?;
        topic.name = name;
        topic.images = draft.images;
        topic.links = draft.links;
        self.commit("update_topic", next, Notice::save_failed)
    }

    /// Replaces note, link, priority and tags of one topic.
    pub fn update_topic_details(
        &mut self,
        subject_id: &str,
        section_id: &str,
        topic_id: &str,
        details: TopicDetails,
    ) -> WorkspaceResult<()> {
        let mut next = self.view().clone();
        let topic = topic_mut(&mut next, subject_id, section_id, topic_id)?;
        topic.note = non_blank(details.note.as_deref());
        topic.link = non_blank(details.link.as_deref());
        topic.priority = details.priority;
        topic.tags = parse_tags(&details.tags_input);
        self.commit("update_topic_details", next, Notice::note_save_failed)
    }

    pub fn delete_topic(
        &mut self,
        subject_id: &str,
        section_id: &str,
        topic_id: &str,
        confirmation: &str,
    ) -> WorkspaceResult<()> {
        self.check_confirmation(confirmation)?;
        let mut next = self.view().clone();
        let section = section_mut(&mut next, subject_id, section_id)?;
        if section.topic(topic_id).is_none() {
            return Err(WorkspaceError::TopicNotFound(topic_id.to_string()));
        }
        section.topics.retain(|topic| topic.id != topic_id);
        self.commit("delete_topic", next, Notice::delete_failed)
    }

    /// Moves topic `active_id` to the slot of `over_id` within a section.
    pub fn reorder_topics(
        &mut self,
        subject_id: &str,
        section_id: &str,
        active_id: &str,
        over_id: Option<&str>,
    ) -> WorkspaceResult<bool> {
        let mut next = self.view().clone();
        let section = section_mut(&mut next, subject_id, section_id)?;
        let Some(topics) = move_by_id(&section.topics, active_id, over_id) else {
            return Ok(false);
        };
        section.topics = topics;
        self.commit("reorder_topics", next, Notice::save_failed)?;
        Ok(true)
    }
}
