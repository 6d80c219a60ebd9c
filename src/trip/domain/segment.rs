//! Flight segments within a trip.

use super::{Endpoint, SegmentId, TripDomainError, TripId, trip::validate_leg};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a segment within its trip. Unique per trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentOrder(u32);

impl SegmentOrder {
    /// Creates a segment order.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the numeric position.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SegmentOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One leg of a trip, usually a single flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    id: SegmentId,
    trip_id: TripId,
    departure: Endpoint,
    arrival: Endpoint,
    order: SegmentOrder,
}

/// Parameter object for reconstructing a persisted segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSegmentData {
    /// Persisted segment identifier.
    pub id: SegmentId,
    /// Persisted owning trip.
    pub trip_id: TripId,
    /// Persisted departure endpoint.
    pub departure: Endpoint,
    /// Persisted arrival endpoint.
    pub arrival: Endpoint,
    /// Persisted position.
    pub order: SegmentOrder,
}

impl Segment {
    /// Creates a segment for `trip_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TripDomainError::ArrivalBeforeDeparture`] when the leg
    /// lands before it takes off.
    pub fn new(
        trip_id: TripId,
        departure: Endpoint,
        arrival: Endpoint,
        order: SegmentOrder,
    ) -> Result<Self, TripDomainError> {
        validate_leg(departure.at(), arrival.at())?;
        Ok(Self {
            id: SegmentId::new(),
            trip_id,
            departure,
            arrival,
            order,
        })
    }

    /// Reconstructs a segment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSegmentData) -> Self {
        Self {
            id: data.id,
            trip_id: data.trip_id,
            departure: data.departure,
            arrival: data.arrival,
            order: data.order,
        }
    }

    /// Returns the segment identifier.
    #[must_use]
    pub const fn id(&self) -> SegmentId {
        self.id
    }

    /// Returns the owning trip.
    #[must_use]
    pub const fn trip_id(&self) -> TripId {
        self.trip_id
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

    /// Returns the position within the trip.
    #[must_use]
    pub const fn order(&self) -> SegmentOrder {
        self.order
    }
}
