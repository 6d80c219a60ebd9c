//! Traveler profile aggregate root.

use super::{PhoneNumber, TravelerDomainError, TravelerId, Username};
use crate::reference::domain::CountryName;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MAX_ADDRESS_LENGTH: usize = 255;

/// Traveler profile aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerProfile {
    id: TravelerId,
    username: Username,
    nationalities: Vec<CountryName>,
    residence_country: CountryName,
    birth_date: Option<NaiveDate>,
    address: Option<String>,
    phone: Option<PhoneNumber>,
    visited_countries: Vec<CountryName>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted traveler identifier.
    pub id: TravelerId,
    /// Persisted username.
    pub username: Username,
    /// Persisted nationalities.
    pub nationalities: Vec<CountryName>,
    /// Persisted country of residence.
    pub residence_country: CountryName,
    /// Persisted birth date, if any.
    pub birth_date: Option<NaiveDate>,
    /// Persisted postal address, if any.
    pub address: Option<String>,
    /// Persisted phone number, if any.
    pub phone: Option<PhoneNumber>,
    /// Persisted visited countries.
    pub visited_countries: Vec<CountryName>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TravelerProfile {
    /// Creates a profile with no contact details and no visited countries.
    ///
    /// Duplicate nationalities are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerDomainError::NoNationality`] when `nationalities`
    /// is empty.
    pub fn new(
        username: Username,
        nationalities: impl IntoIterator<Item = CountryName>,
        residence_country: CountryName,
        clock: &impl Clock,
    ) -> Result<Self, TravelerDomainError> {
        let unique_nationalities = dedup_countries(nationalities);
        if unique_nationalities.is_empty() {
            return Err(TravelerDomainError::NoNationality);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TravelerId::new(),
            username,
            nationalities: unique_nationalities,
            residence_country,
            birth_date: None,
            address: None,
            phone: None,
            visited_countries: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            nationalities: data.nationalities,
            residence_country: data.residence_country,
            birth_date: data.birth_date,
            address: data.address,
            phone: data.phone,
            visited_countries: data.visited_countries,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the traveler identifier.
    #[must_use]
    pub const fn id(&self) -> TravelerId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the nationalities.
    #[must_use]
    pub fn nationalities(&self) -> &[CountryName] {
        &self.nationalities
    }

    /// Returns the country of residence.
    #[must_use]
    pub const fn residence_country(&self) -> &CountryName {
        &self.residence_country
    }

    /// Returns the birth date, if known.
    #[must_use]
    pub const fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// Returns the postal address, if known.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Returns the phone number, if known.
    #[must_use]
    pub const fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Returns the countries already visited.
    #[must_use]
    pub fn visited_countries(&self) -> &[CountryName] {
        &self.visited_countries
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the traveler holds the given nationality.
    #[must_use]
    pub fn is_national_of(&self, country: &CountryName) -> bool {
        self.nationalities.contains(country)
    }

    /// Returns `true` when the traveler has visited the given country.
    #[must_use]
    pub fn has_visited(&self, country: &CountryName) -> bool {
        self.visited_countries.contains(country)
    }

    /// Records a visit to `country`.
    ///
    /// Returns `false` without touching the profile when the country was
    /// already recorded.
    pub fn record_visit(&mut self, country: CountryName, clock: &impl Clock) -> bool {
        if self.has_visited(&country) {
            return false;
        }
        self.visited_countries.push(country);
        self.touch(clock);
        true
    }

    /// Replaces the postal address and phone number.
    ///
    /// A blank address is stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerDomainError::AddressTooLong`] when the address
    /// exceeds 255 characters.
    pub fn update_contact(
        &mut self,
        address: Option<String>,
        phone: Option<PhoneNumber>,
        clock: &impl Clock,
    ) -> Result<(), TravelerDomainError> {
        let normalized = address
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        if normalized
            .as_ref()
            .is_some_and(|value| value.chars().count() > MAX_ADDRESS_LENGTH)
        {
            return Err(TravelerDomainError::AddressTooLong);
        }
        self.address = normalized;
        self.phone = phone;
        self.touch(clock);
        Ok(())
    }

    /// Changes the country of residence.
    pub fn change_residence(&mut self, country: CountryName, clock: &impl Clock) {
        self.residence_country = country;
        self.touch(clock);
    }

    /// Sets or clears the birth date.
    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>, clock: &impl Clock) {
        self.birth_date = birth_date;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn dedup_countries(countries: impl IntoIterator<Item = CountryName>) -> Vec<CountryName> {
    let mut unique: Vec<CountryName> = Vec::new();
    for country in countries {
        if !unique.contains(&country) {
            unique.push(country);
        }
    }
    unique
}
