//! Proof types for validated content.
//!
//! These types enforce invariants at construction time. Once you hold a value,
//! you know it satisfies all required constraints.

use thiserror::Error;

/// Outgoing message text, proven non-empty after trimming.
///
/// The send pipeline's precondition is "text non-empty after trimming
/// whitespace; otherwise a no-op". Constructing a `ComposedText` is that
/// check: callers holding one never need to re-validate.
///
/// The raw text (including surrounding whitespace) is preserved — the
/// transcript shows what the user typed, while [`ComposedText::trimmed`] is
/// what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedText(String);

#[derive(Debug, Error)]
#[error("message text must not be empty")]
pub struct EmptyTextError;

impl ComposedText {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyTextError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyTextError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ComposedText {
    type Error = EmptyTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ComposedText {
    type Error = EmptyTextError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for ComposedText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
