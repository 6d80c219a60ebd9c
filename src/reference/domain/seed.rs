//! Serialisable reference data documents.
//!
//! A [`ReferenceSeed`] is the exchange format for bulk reference data: the
//! CLI reads it from JSON files and the import service converts each entry
//! into validated domain values.

use super::{AdvisoryLevel, Climate, Country, CountryName, CountryUnion, ReferenceDomainError, Vaccine};
use serde::{Deserialize, Serialize};

/// Bulk reference data document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSeed {
    /// Country records.
    #[serde(default)]
    pub countries: Vec<CountrySeed>,
    /// Climate descriptions.
    #[serde(default)]
    pub climates: Vec<ClimateSeed>,
    /// Country unions.
    #[serde(default)]
    pub unions: Vec<UnionSeed>,
}

/// Unvalidated country entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySeed {
    /// Country name.
    pub name: String,
    /// Whether malaria is present.
    #[serde(default)]
    pub malaria_presence: bool,
    /// Travel-advisory level, if known.
    #[serde(default)]
    pub advisory_level: Option<u8>,
    /// Recommended vaccines.
    #[serde(default)]
    pub vaccines: Vec<VaccineSeed>,
}

/// Unvalidated vaccine entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineSeed {
    /// Vaccine category.
    pub category: String,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Unvalidated climate entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimateSeed {
    /// Country the climate describes.
    pub country: String,
    /// Climate description.
    pub description: String,
}

/// Unvalidated union entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionSeed {
    /// Union name.
    pub name: String,
    /// Member country names.
    #[serde(default)]
    pub members: Vec<String>,
    /// Whether members need a visa to visit each other.
    #[serde(default = "default_visa_required")]
    pub visa_required_between_members: bool,
    /// Whether the union issues a common visa.
    #[serde(default)]
    pub common_visa: bool,
}

const fn default_visa_required() -> bool {
    true
}

impl ReferenceSeed {
    /// Parses a seed document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not a valid document.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl CountrySeed {
    /// Converts the entry into a validated [`Country`].
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError`] when the name or a vaccine category
    /// is invalid.
    pub fn to_domain(&self) -> Result<Country, ReferenceDomainError> {
        let name = CountryName::new(self.name.as_str())?;
        let vaccines = self
            .vaccines
            .iter()
            .map(VaccineSeed::to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        let mut country = Country::new(name)
            .with_malaria_presence(self.malaria_presence)
            .with_vaccines(vaccines);
        if let Some(level) = self.advisory_level {
            country = country.with_advisory_level(AdvisoryLevel::new(level));
        }
        Ok(country)
    }
}

impl VaccineSeed {
    /// Converts the entry into a validated [`Vaccine`].
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError::EmptyVaccineCategory`] when the
    /// category is blank.
    pub fn to_domain(&self) -> Result<Vaccine, ReferenceDomainError> {
        let mut vaccine = Vaccine::new(self.category.as_str())?;
        if let Some(note) = self.note.as_deref() {
            vaccine = vaccine.with_note(note);
        }
        Ok(vaccine)
    }
}

impl ClimateSeed {
    /// Converts the entry into a validated [`Climate`].
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError`] when the country name or description
    /// is invalid.
    pub fn to_domain(&self) -> Result<Climate, ReferenceDomainError> {
        let country = CountryName::new(self.country.as_str())?;
        Climate::new(country, self.description.as_str())
    }
}

impl UnionSeed {
    /// Converts the entry into a validated [`CountryUnion`].
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError`] when the union name or a member name
    /// is invalid.
    pub fn to_domain(&self) -> Result<CountryUnion, ReferenceDomainError> {
        let members = self
            .members
            .iter()
            .map(|member| CountryName::new(member.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CountryUnion::new(self.name.as_str(), members)?
            .with_visa_required_between_members(self.visa_required_between_members)
            .with_common_visa(self.common_visa))
    }
}
