//! Country records and their health and safety attributes.

use super::{CountryName, ReferenceDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Government travel-advisory level for a country.
///
/// Level `0` means normal precautions; anything above signals that travelers
/// should take extra care, which makes repatriation insurance advisable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvisoryLevel(u8);

impl AdvisoryLevel {
    /// Creates an advisory level.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` when the advisory asks for more than normal precautions.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for AdvisoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vaccine recommended or required for travel to a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccine {
    category: String,
    note: Option<String>,
}

impl Vaccine {
    /// Creates a vaccine entry.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError::EmptyVaccineCategory`] when the
    /// category is blank.
    pub fn new(category: impl Into<String>) -> Result<Self, ReferenceDomainError> {
        let raw = category.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReferenceDomainError::EmptyVaccineCategory);
        }
        Ok(Self {
            category: trimmed.to_owned(),
            note: None,
        })
    }

    /// Attaches a free-text note (e.g. "required for rural areas").
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let raw = note.into();
        let trimmed = raw.trim();
        self.note = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns the vaccine category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the optional note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Reference record for a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    name: CountryName,
    malaria_presence: bool,
    advisory_level: Option<AdvisoryLevel>,
    vaccines: Vec<Vaccine>,
}

impl Country {
    /// Creates a country record with no malaria, no advisory and no vaccines.
    #[must_use]
    pub const fn new(name: CountryName) -> Self {
        Self {
            name,
            malaria_presence: false,
            advisory_level: None,
            vaccines: Vec::new(),
        }
    }

    /// Marks whether malaria is present in the country.
    #[must_use]
    pub const fn with_malaria_presence(mut self, present: bool) -> Self {
        self.malaria_presence = present;
        self
    }

    /// Sets the travel-advisory level.
    #[must_use]
    pub const fn with_advisory_level(mut self, level: AdvisoryLevel) -> Self {
        self.advisory_level = Some(level);
        self
    }

    /// Sets the recommended vaccines.
    #[must_use]
    pub fn with_vaccines(mut self, vaccines: impl IntoIterator<Item = Vaccine>) -> Self {
        self.vaccines = vaccines.into_iter().collect();
        self
    }

    /// Returns the country name.
    #[must_use]
    pub const fn name(&self) -> &CountryName {
        &self.name
    }

    /// Returns `true` when malaria is present.
    #[must_use]
    pub const fn malaria_presence(&self) -> bool {
        self.malaria_presence
    }

    /// Returns the travel-advisory level, if known.
    #[must_use]
    pub const fn advisory_level(&self) -> Option<AdvisoryLevel> {
        self.advisory_level
    }

    /// Returns the recommended vaccines.
    #[must_use]
    pub fn vaccines(&self) -> &[Vaccine] {
        &self.vaccines
    }
}
