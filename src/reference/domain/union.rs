//! Country unions (e.g. Schengen area) with shared visa policies.

use super::{CountryName, ReferenceDomainError, name::MAX_NAME_LENGTH};
use serde::{Deserialize, Serialize};

/// A group of countries sharing travel rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryUnion {
    name: String,
    members: Vec<CountryName>,
    visa_required_between_members: bool,
    common_visa: bool,
}

impl CountryUnion {
    /// Creates a union with the given members.
    ///
    /// Duplicate members are dropped. By default members need a visa to
    /// visit each other and the union issues no common visa.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDomainError::EmptyUnionName`] when the name is
    /// blank and [`ReferenceDomainError::UnionNameTooLong`] when it exceeds
    /// 255 characters.
    pub fn new(
        name: impl Into<String>,
        members: impl IntoIterator<Item = CountryName>,
    ) -> Result<Self, ReferenceDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReferenceDomainError::EmptyUnionName);
        }
        let length = trimmed.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ReferenceDomainError::UnionNameTooLong {
                max: MAX_NAME_LENGTH,
                length,
            });
        }
        let mut unique: Vec<CountryName> = Vec::new();
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        Ok(Self {
            name: trimmed.to_owned(),
            members: unique,
            visa_required_between_members: true,
            common_visa: false,
        })
    }

    /// Sets whether members need a visa to travel between each other.
    #[must_use]
    pub const fn with_visa_required_between_members(mut self, required: bool) -> Self {
        self.visa_required_between_members = required;
        self
    }

    /// Sets whether the union issues a common visa to outsiders.
    #[must_use]
    pub const fn with_common_visa(mut self, common_visa: bool) -> Self {
        self.common_visa = common_visa;
        self
    }

    /// Returns the union name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member countries.
    #[must_use]
    pub fn members(&self) -> &[CountryName] {
        &self.members
    }

    /// Returns `true` when members need a visa to visit each other.
    #[must_use]
    pub const fn visa_required_between_members(&self) -> bool {
        self.visa_required_between_members
    }

    /// Returns `true` when the union issues a common visa.
    #[must_use]
    pub const fn common_visa(&self) -> bool {
        self.common_visa
    }

    /// Returns `true` when `country` is a member.
    #[must_use]
    pub fn contains(&self, country: &CountryName) -> bool {
        self.members.contains(country)
    }

    /// Returns `true` when both countries are members.
    #[must_use]
    pub fn covers(&self, first: &CountryName, second: &CountryName) -> bool {
        self.contains(first) && self.contains(second)
    }
}
