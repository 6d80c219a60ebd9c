//! Identifier types for the traveler domain.

use super::TravelerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a traveler profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelerId(Uuid);

impl TravelerId {
    /// Creates a new random traveler identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a traveler identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TravelerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TravelerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum username length, matching the `VARCHAR(150)` column.
const MAX_USERNAME_LENGTH: usize = 150;

/// Unique login handle of a traveler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerDomainError::EmptyUsername`] when blank,
    /// [`TravelerDomainError::InvalidUsername`] when it contains inner
    /// whitespace, or [`TravelerDomainError::UsernameTooLong`] when longer
    /// than 150 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TravelerDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TravelerDomainError::EmptyUsername);
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(TravelerDomainError::UsernameTooLong(raw));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(TravelerDomainError::InvalidUsername(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
