//! Account password type.
//!
//! Passwords are stored and compared as plain text. The wrapper only keeps
//! them out of `Debug` output and log lines.

use serde::{Deserialize, Serialize};

/// A plain-text account password.
///
/// Implements `Debug` manually to redact the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wrap a password string.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Expose the password for comparison or persistence.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Number of characters (not bytes) in the password.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Exact comparison against a candidate password.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(password)
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(password.to_owned())
    }
}
