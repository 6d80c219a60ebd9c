//! Departure and arrival points.

use super::TripDomainError;
use crate::reference::domain::CountryName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const AIRPORT_CODE_LENGTH: usize = 3;

/// Three-letter IATA airport code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Creates a validated airport code.
    ///
    /// # Errors
    ///
    /// Returns [`TripDomainError::InvalidAirportCode`] unless the trimmed
    /// value is exactly three ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, TripDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.len() != AIRPORT_CODE_LENGTH || !trimmed.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(TripDomainError::InvalidAirportCode(raw));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AirportCode {
    type Error = TripDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AirportCode> for String {
    fn from(value: AirportCode) -> Self {
        value.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A place and time at either end of a trip or segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    country: CountryName,
    airport: AirportCode,
    at: DateTime<Utc>,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub const fn new(country: CountryName, airport: AirportCode, at: DateTime<Utc>) -> Self {
        Self {
            country,
            airport,
            at,
        }
    }

    /// Returns the country.
    #[must_use]
    pub const fn country(&self) -> &CountryName {
        &self.country
    }

    /// Returns the airport code.
    #[must_use]
    pub const fn airport(&self) -> &AirportCode {
        &self.airport
    }

    /// Returns the scheduled time.
    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub(super) const fn set_time(&mut self, at: DateTime<Utc>) {
        self.at = at;
    }
}
