//! Contact detail value types.

use super::TravelerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_PHONE_LENGTH: usize = 20;

/// Phone number as entered by the traveler.
///
/// Accepts digits plus `+`, `-`, `(`, `)` and spaces, up to 20 characters,
/// with at least one digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a validated phone number.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerDomainError::InvalidPhone`] when the value is too
    /// long, has no digit, or contains other characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TravelerDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let allowed = trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
        let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
        if !allowed || !has_digit || trimmed.len() > MAX_PHONE_LENGTH {
            return Err(TravelerDomainError::InvalidPhone(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
