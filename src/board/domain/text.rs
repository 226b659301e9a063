//! Validated text values shared by boards, columns, and tasks.

use super::{BoardDomainError, EntityKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed entity title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a validated title for the given entity kind.
    ///
    /// Surrounding whitespace is removed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the value is empty or
    /// whitespace-only.
    pub fn new(kind: EntityKind, value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTitle(kind));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Rebuilds a title from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty task description.
///
/// Blank descriptions are never represented; they normalize to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Normalizes raw input, returning `None` for blank values.
    #[must_use]
    pub fn normalize(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// Rebuilds a description from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
