//! Error types for the trip domain.

use crate::reference::domain::InvalidCountryName;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation errors for trip and segment values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripDomainError {
    /// An airport code is not three ASCII letters.
    #[error("invalid airport code: {0:?}")]
    InvalidAirportCode(String),

    /// A country name is invalid.
    #[error(transparent)]
    Country(#[from] InvalidCountryName),

    /// Arrival is scheduled before departure.
    #[error("arrival at {arrival} precedes departure at {departure}")]
    ArrivalBeforeDeparture {
        /// Scheduled departure.
        departure: DateTime<Utc>,
        /// Scheduled arrival.
        arrival: DateTime<Utc>,
    },

    /// Return is scheduled before arrival.
    #[error("return at {return_at} precedes arrival at {arrival}")]
    ReturnBeforeArrival {
        /// Scheduled arrival.
        arrival: DateTime<Utc>,
        /// Scheduled return.
        return_at: DateTime<Utc>,
    },
}
