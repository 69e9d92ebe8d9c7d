//! CRUD orchestrators over the shared document.
//!
//! # Responsibility
//! - Apply subject/section/topic mutations to a copy of the visible document.
//! - Run every mutation through optimistic update, remote replace and
//!   rollback on failure.
//!
//! # Invariants
//! - Names are trimmed and must not be blank.
//! - A failed persist restores the pre-mutation document exactly and raises
//!   exactly one notice.
//! - Rejected delete confirmations never reach the store.
//!
//! # See also
//! - crate::store::client for the cache-first reader used by `Workspace::load`

use crate::model::document::EntityId;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod delete_gate;
pub mod notice;
mod sections;
mod subjects;
pub mod sync_state;
mod topics;
pub mod workspace;

pub use topics::TopicDetails;

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Errors from orchestrator operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    /// Name is blank after trim.
    InvalidName,
    SubjectNotFound(EntityId),
    SectionNotFound(EntityId),
    TopicNotFound(EntityId),
    /// Delete confirmation did not match the shared secret.
    ConfirmationRejected,
    /// Remote replace failed; the view was rolled back.
    Persist(StoreError),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::SubjectNotFound(id) => write!(f, "subject not found: {id}"),
            Self::SectionNotFound(id) => write!(f, "section not found: {id}"),
            Self::TopicNotFound(id) => write!(f, "topic not found: {id}"),
            Self::ConfirmationRejected => write!(f, "incorrect confirmation, nothing deleted"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for WorkspaceError {
    fn from(value: StoreError) -> Self {
        Self::Persist(value)
    }
}

/// Trims `name` and rejects blank values.
pub fn normalize_name(name: impl AsRef<str>) -> WorkspaceResult<String> {
    let trimmed = name.as_ref().trim();
    if trimmed.is_empty() {
        return Err(WorkspaceError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// Parses free-form tag input.
///
/// Splits on whitespace and prefixes `#` where missing.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(|tag| {
            if tag.starts_with('#') {
                tag.to_string()
            } else {
                format!("#{tag}")
            }
        })
        .collect()
}

/// Trims optional free text; blank becomes `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::{non_blank, normalize_name, parse_tags, WorkspaceError};

    #[test]
    fn normalize_name_trims_and_rejects_blank() {
        assert_eq!(normalize_name(" Math ").unwrap(), "Math");
        assert_eq!(normalize_name(" \t\n"), Err(WorkspaceError::InvalidName));
    }

    #[test]
    fn parse_tags_prefixes_hash() {
        assert_eq!(
            parse_tags("  rust #async   io\n"),
            vec!["#rust", "#async", "#io"]
        );
        assert!(parse_tags("   ").is_empty());
    }

    #[test]
    fn non_blank_drops_empty_text() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" x ")), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
