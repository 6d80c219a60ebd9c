//! Climate descriptions per country.

use super::{CountryName, ReferenceDomainError};
use serde::{Deserialize, Serialize};

/// Free-text climate summary for a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Climate {
    country: CountryName,
    description: String,
}

impl Climate {
    /// Creates a climate record.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError::EmptyClimateDescription`] when the
    /// description is blank.
    pub fn new(
        country: CountryName,
        description: impl Into<String>,
    ) -> Result<Self, ReferenceDomainError> {
        let raw = description.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReferenceDomainError::EmptyClimateDescription(
                country.to_string(),
            ));
        }
        Ok(Self {
            country,
            description: trimmed.to_owned(),
        })
    }

    /// Returns the country this climate describes.
    #[must_use]
    pub const fn country(&self) -> &CountryName {
        &self.country
    }

    /// Returns the climate description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
