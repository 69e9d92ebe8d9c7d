//! Error alerts raised by orchestrators when a persist fails.

/// One alert shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    fn error(message: &str) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.to_string(),
        }
    }

    /// Failed persist of a create, update or reorder.
    pub fn save_failed() -> Self {
        Self::error("Could not save. Please try again.")
    }

    /// Failed persist of topic note metadata.
    pub fn note_save_failed() -> Self {
        Self::error("Could not save the note.")
    }

    /// Failed persist of a delete.
    pub fn delete_failed() -> Self {
        Self::error("Could not delete. Please try again.")
    }
}
