//! Trip aggregate root.

use super::{Endpoint, TripDomainError, TripId};
use crate::traveler::domain::TravelerId;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A journey from a departure endpoint to an arrival endpoint.
///
/// Arrival never precedes departure and the optional return never precedes
/// arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    id: TripId,
    traveler_id: TravelerId,
    departure: Endpoint,
    arrival: Endpoint,
    return_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTripData {
    /// Persisted trip identifier.
    pub id: TripId,
    /// Persisted owner.
    pub traveler_id: TravelerId,
    /// Persisted departure endpoint.
    pub departure: Endpoint,
    /// Persisted arrival endpoint.
    pub arrival: Endpoint,
    /// Persisted return time, if any.
    pub return_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Creates a new trip.
    ///
    /// # Errors
    ///
    /// Returns [`TripDomainError::ArrivalBeforeDeparture`] or
    /// [`TripDomainError::ReturnBeforeArrival`] when the schedule is out of
    /// order.
    pub fn new(
        traveler_id: TravelerId,
        departure: Endpoint,
        arrival: Endpoint,
        return_at: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<Self, TripDomainError> {
        validate_schedule(departure.at(), arrival.at(), return_at)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TripId::new(),
            traveler_id,
            departure,
            arrival,
            return_at,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a trip from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTripData) -> Self {
        Self {
            id: data.id,
            traveler_id: data.traveler_id,
            departure: data.departure,
            arrival: data.arrival,
            return_at: data.return_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the trip identifier.
    #[must_use]
    pub const fn id(&self) -> TripId {
        self.id
    }

    /// Returns the owning traveler.
    #[must_use]
    pub const fn traveler_id(&self) -> TravelerId {
        self.traveler_id
    }

    /// Returns the departure endpoint.
    #[must_use]
    pub const fn departure(&self) -> &Endpoint {
        &self.departure
    }

    /// Returns the arrival endpoint.
    #[must_use]
    pub const fn arrival(&self) -> &Endpoint {
        &self.arrival
    }

    /// Returns the return time, if one is planned.
    #[must_use]
    pub const fn return_at(&self) -> Option<DateTime<Utc>> {
        self.return_at
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

    /// Returns the calendar date of departure.
    #[must_use]
    pub fn departure_date(&self) -> NaiveDate {
        self.departure.at().date_naive()
    }

    /// Time between departure and arrival.
    #[must_use]
    pub fn flight_duration(&self) -> TimeDelta {
        self.arrival.at() - self.departure.at()
    }

    /// Time between arrival and return, or `None` for a one-way trip.
    #[must_use]
    pub fn stay_duration(&self) -> Option<TimeDelta> {
        self.return_at.map(|return_at| return_at - self.arrival.at())
    }

    /// Moves the trip to a new schedule. Places are unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`TripDomainError`] when the new schedule is out of order;
    /// the trip is left untouched in that case.
    pub fn reschedule(
        &mut self,
        departure_at: DateTime<Utc>,
        arrival_at: DateTime<Utc>,
        return_at: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<(), TripDomainError> {
        validate_schedule(departure_at, arrival_at, return_at)?;
        self.departure.set_time(departure_at);
        self.arrival.set_time(arrival_at);
        self.return_at = return_at;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

pub(super) fn validate_leg(
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
) -> Result<(), TripDomainError> {
    if arrival < departure {
        return Err(TripDomainError::ArrivalBeforeDeparture { departure, arrival });
    }
    Ok(())
}

fn validate_schedule(
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    return_at: Option<DateTime<Utc>>,
) -> Result<(), TripDomainError> {
    validate_leg(departure, arrival)?;
    if let Some(return_time) = return_at
        && return_time < arrival
    {
        return Err(TripDomainError::ReturnBeforeArrival {
            arrival,
            return_at: return_time,
        });
    }
    Ok(())
}
