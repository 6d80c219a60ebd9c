//! Validated country name type.

use super::InvalidCountryName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a country name, matching the `VARCHAR(255)` columns.
pub(crate) const MAX_NAME_LENGTH: usize = 255;

/// Country name as entered by a traveler or listed in reference data.
///
/// The original spelling is preserved for display. Comparisons between names
/// go through [`CountryName::key`], which ignores case and surrounding
/// whitespace, so `"france"` and `"France "` designate the same country.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryName(String);

impl CountryName {
    /// Creates a validated country name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCountryName::Empty`] when the value is blank and
    /// [`InvalidCountryName::TooLong`] when it exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidCountryName> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidCountryName::Empty);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(InvalidCountryName::TooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the normalised lookup key.
    #[must_use]
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }

    /// Returns `true` when both names designate the same country.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl PartialEq for CountryName {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for CountryName {}

impl std::hash::Hash for CountryName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl TryFrom<String> for CountryName {
    type Error = InvalidCountryName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryName> for String {
    fn from(value: CountryName) -> Self {
        value.0
    }
}

impl AsRef<str> for CountryName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CountryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
