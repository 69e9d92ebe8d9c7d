//! Roadmap document model.
//!
//! # Responsibility
//! - Define the single persisted root (`Document`) and its three levels.
//! - Keep JSON shape compatible with documents written by older clients.
//!
//! # Invariants
//! - Ids are opaque strings, unique within their containing list.
//! - Array order is the only ordering signal; there is no rank field.
//! - Missing or `null` child lists deserialize as empty lists.
//!
//! # See also
//! - crate::markup for the marker syntax stored in `Topic::name`

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque identifier for subjects, sections and topics.
pub type EntityId = String;

/// Palette id assigned to subjects created without an explicit color.
pub const DEFAULT_SUBJECT_COLOR: &str = "orange";

/// Generates a fresh entity id.
///
/// Ids are random v4 UUIDs rendered as strings, so they are never reused.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Root object stored remotely. Unit of read and write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subjects: Vec<Subject>,
}

/// Top level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: EntityId,
    pub name: String,
    /// Palette id, e.g. `orange` or `blue`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sections: Vec<Section>,
}

/// Second level: a named group of topics inside a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<Topic>,
}

/// Topic priority badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Out-of-band link referenced by a `[link:N]` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Display text; the selection the link was created from.
    pub text: String,
    /// Starts with `/` for in-app targets, otherwise an external URL.
    pub url: String,
}

impl LinkRef {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }

    /// Returns whether `url` is an in-app navigation path.
    pub fn is_internal(&self) -> bool {
        self.url.starts_with('/')
    }
}

/// Leaf of the hierarchy.
///
/// `name` is marker-encoded: `[img:N]` indexes `images` and `[link:N]`
/// indexes `links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<LinkRef>,
}

impl Subject {
    /// Creates a subject with a fresh id and no sections.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            color: Some(DEFAULT_SUBJECT_COLOR.to_string()),
            emoji: None,
            sections: Vec::new(),
        }
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == section_id)
    }
}

impl Section {
    /// Creates a section with a fresh id and no topics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            topics: Vec::new(),
        }
    }

    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == topic_id)
    }
}

impl Topic {
    /// Creates a topic with a fresh id and no metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            note: None,
            link: None,
            priority: None,
            tags: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl Document {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == subject_id)
    }

    pub fn section(&self, subject_id: &str, section_id: &str) -> Option<&Section> {
        self.subject(subject_id)?.section(section_id)
    }

    pub fn topic(&self, subject_id: &str, section_id: &str, topic_id: &str) -> Option<&Topic> {
        self.section(subject_id, section_id)?.topic(topic_id)
    }

    /// Counts topics across all subjects and sections.
    pub fn topic_count(&self) -> usize {
        self.subjects
            .iter()
            .flat_map(|subject| subject.sections.iter())
            .map(|section| section.topics.len())
            .sum()
    }
}

/// Path of a section page, e.g. `/subject/42/section/7`.
pub fn section_path(subject_id: &str, section_id: &str) -> String {
    format!("/subject/{subject_id}/section/{section_id}")
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{section_path, Document, LinkRef, Priority, Subject, Topic};
    use std::collections::HashSet;

    #[test]
    fn null_and_missing_lists_read_as_empty() {
        let raw = r#"{
            "subjects": [
                { "id": "s1", "name": "Backend", "sections": null },
                { "id": "s2", "name": "Frontend", "sections": [
                    { "id": "x1", "name": "CSS" },
                    { "id": "x2", "name": "JS", "topics": [
                        { "id": "t1", "name": "loops", "tags": null, "note": null, "priority": "high" }
                    ] }
                ] }
            ]
        }"#;
        let document: Document = serde_json::from_str(raw).expect("document should parse");

        assert!(document.subjects[0].sections.is_empty());
        assert!(document.subjects[1].sections[0].topics.is_empty());
        let topic = document.topic("s2", "x2", "t1").expect("topic should exist");
        assert!(topic.tags.is_empty());
        assert_eq!(topic.note, None);
        assert_eq!(topic.priority, Some(Priority::High));
    }

    #[test]
    fn missing_subjects_reads_as_empty_document() {
        let document: Document = serde_json::from_str("{}").expect("empty object should parse");
        assert!(document.is_empty());
    }

    #[test]
    fn empty_optional_fields_are_omitted_on_write() {
        let topic = Topic::new("plain");
        let value = serde_json::to_value(&topic).expect("topic should serialize");
        let object = value.as_object().expect("topic should be an object");
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("id"));
        assert!(object.contains_key("name"));
    }

    #[test]
    fn fresh_ids_are_unique() {
        let ids = (0..64)
            .map(|_| Subject::new("x").id)
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn section_path_uses_both_ids() {
        assert_eq!(section_path("a", "b"), "/subject/a/section/b");
    }

    #[test]
    fn only_slash_prefixed_urls_are_internal() {
        assert!(LinkRef::new("algebra", section_path("a", "b")).is_internal());
        assert!(!LinkRef::new("docs", "https://example.com/a").is_internal());
        assert!(!LinkRef::new("relative", "subject/a").is_internal());
    }
}
