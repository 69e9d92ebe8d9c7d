//! Accidental-deletion guard.
//!
//! Not an authentication boundary: the secret is shared and compared as-is.

/// Confirms deletions by re-entry of a shared secret.
#[derive(Clone, PartialEq, Eq)]
pub struct DeleteGate {
    secret: String,
}

impl DeleteGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Returns whether `input` equals the secret. Case-sensitive, no trimming.
    pub fn confirm(&self, input: &str) -> bool {
        !self.secret.is_empty() && input == self.secret
    }
}

impl std::fmt::Debug for DeleteGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteGate")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::DeleteGate;

    #[test]
    fn compares_case_sensitively() {
        let gate = DeleteGate::new("Secret");
        assert!(gate.confirm("Secret"));
        assert!(!gate.confirm("secret"));
        assert!(!gate.confirm(" Secret"));
        assert!(!gate.confirm(""));
    }

    #[test]
    fn empty_secret_never_confirms() {
        assert!(!DeleteGate::new("").confirm(""));
    }
}
