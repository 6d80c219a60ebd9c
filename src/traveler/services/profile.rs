//! Service layer for traveler profile management.

use crate::reference::domain::CountryName;
use crate::traveler::{
    domain::{PhoneNumber, TravelerDomainError, TravelerId, TravelerProfile, Username},
    ports::{TravelerRepository, TravelerRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a traveler profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProfileRequest {
    username: String,
    nationalities: Vec<String>,
    residence_country: String,
    birth_date: Option<NaiveDate>,
    address: Option<String>,
    phone: Option<String>,
    visited_countries: Vec<String>,
}

impl CreateProfileRequest {
    /// Creates a request with the required profile fields.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        nationalities: impl IntoIterator<Item = String>,
        residence_country: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            nationalities: nationalities.into_iter().collect(),
            residence_country: residence_country.into(),
            birth_date: None,
            address: None,
            phone: None,
            visited_countries: Vec::new(),
        }
    }

    /// Sets the birth date.
    #[must_use]
    pub const fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the countries already visited.
    #[must_use]
    pub fn with_visited_countries(mut self, countries: impl IntoIterator<Item = String>) -> Self {
        self.visited_countries = countries.into_iter().collect();
        self
    }
}

/// Service-level errors for traveler profile operations.
#[derive(Debug, Error)]
pub enum TravelerProfileError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TravelerDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TravelerRepositoryError),
}

/// Result type for traveler profile service operations.
pub type TravelerProfileResult<T> = Result<T, TravelerProfileError>;

/// Traveler profile orchestration service.
#[derive(Clone)]
pub struct TravelerProfileService<R, C>
where
    R: TravelerRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TravelerProfileService<R, C>
where
    R: TravelerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new traveler profile service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores a new profile.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerProfileError::Domain`] when a field is invalid and
    /// [`TravelerProfileError::Repository`] when the username is taken or
    /// persistence fails.
    pub async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> TravelerProfileResult<TravelerProfile> {
        let CreateProfileRequest {
            username: raw_username,
            nationalities: raw_nationalities,
            residence_country,
            birth_date,
            address,
            phone: raw_phone,
            visited_countries,
        } = request;

        let username = Username::new(raw_username)?;
        let nationalities = parse_countries(raw_nationalities)?;
        let residence = CountryName::new(residence_country).map_err(TravelerDomainError::from)?;
        let phone = raw_phone.map(PhoneNumber::new).transpose()?;

        let mut profile =
            TravelerProfile::new(username, nationalities, residence, &*self.clock)?;
        profile.set_birth_date(birth_date, &*self.clock);
        profile.update_contact(address, phone, &*self.clock)?;
        for country in parse_countries(visited_countries)? {
            profile.record_visit(country, &*self.clock);
        }

        self.repository.store(&profile).await?;
        info!(traveler_id = %profile.id(), username = %profile.username(), "traveler profile created");
        Ok(profile)
    }

    /// Finds a profile by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerProfileError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TravelerId) -> TravelerProfileResult<Option<TravelerProfile>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a profile by username.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerProfileError::Domain`] when the username is invalid
    /// or [`TravelerProfileError::Repository`] when lookup fails.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> TravelerProfileResult<Option<TravelerProfile>> {
        let parsed = Username::new(username)?;
        Ok(self.repository.find_by_username(&parsed).await?)
    }

    /// Records a visit to `country`. Recording the same country twice is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerProfileError`] when the country name is invalid,
    /// the profile does not exist, or persistence fails.
    pub async fn record_visit(
        &self,
        id: TravelerId,
        country: &str,
    ) -> TravelerProfileResult<TravelerProfile> {
        let visited = CountryName::new(country).map_err(TravelerDomainError::from)?;
        let mut profile = self.find_by_id_or_error(id).await?;
        if profile.record_visit(visited, &*self.clock) {
            self.repository.update(&profile).await?;
        }
        Ok(profile)
    }

    /// Replaces the profile's address and phone number.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerProfileError`] when a value is invalid, the profile
    /// does not exist, or persistence fails.
    pub async fn update_contact(
        &self,
        id: TravelerId,
        address: Option<String>,
        phone: Option<String>,
    ) -> TravelerProfileResult<TravelerProfile> {
        let parsed_phone = phone.map(PhoneNumber::new).transpose()?;
        let mut profile = self.find_by_id_or_error(id).await?;
        profile.update_contact(address, parsed_phone, &*self.clock)?;
        self.repository.update(&profile).await?;
        Ok(profile)
    }

    /// Changes the profile's country of residence.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerProfileError`] when the country name is invalid,
    /// the profile does not exist, or persistence fails.
    pub async fn change_residence(
        &self,
        id: TravelerId,
        country: &str,
    ) -> TravelerProfileResult<TravelerProfile> {
        let residence = CountryName::new(country).map_err(TravelerDomainError::from)?;
        let mut profile = self.find_by_id_or_error(id).await?;
        profile.change_residence(residence, &*self.clock);
        self.repository.update(&profile).await?;
        Ok(profile)
    }

    async fn find_by_id_or_error(&self, id: TravelerId) -> TravelerProfileResult<TravelerProfile> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TravelerProfileError::Repository(
                TravelerRepositoryError::NotFound(id),
            ))
    }
}

fn parse_countries(names: Vec<String>) -> Result<Vec<CountryName>, TravelerDomainError> {
    names
        .into_iter()
        .map(|name| CountryName::new(name).map_err(TravelerDomainError::from))
        .collect()
}
