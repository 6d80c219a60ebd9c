//! Service layer for recording trips and their segments.

use crate::reference::domain::CountryName;
use crate::traveler::domain::TravelerId;
use crate::trip::{
    domain::{AirportCode, Endpoint, Segment, SegmentId, SegmentOrder, Trip, TripDomainError, TripId},
    ports::{TripRepository, TripRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Unvalidated place and time, as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointRequest {
    country: String,
    airport: String,
    at: DateTime<Utc>,
}

impl EndpointRequest {
    /// Creates an endpoint request.
    #[must_use]
    pub fn new(country: impl Into<String>, airport: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            country: country.into(),
            airport: airport.into(),
            at,
        }
    }

    fn into_endpoint(self) -> Result<Endpoint, TripDomainError> {
        Ok(Endpoint::new(
            CountryName::new(self.country)?,
            AirportCode::new(self.airport)?,
            self.at,
        ))
    }
}

/// Request payload for recording a trip.
///
/// Deserialises from the trip documents read by the CLI; a missing
/// `traveler_id` gets a fresh identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTripRequest {
    #[serde(default)]
    traveler_id: TravelerId,
    departure: EndpointRequest,
    arrival: EndpointRequest,
    #[serde(default)]
    return_at: Option<DateTime<Utc>>,
}

impl CreateTripRequest {
    /// Creates a one-way trip request.
    #[must_use]
    pub const fn new(
        traveler_id: TravelerId,
        departure: EndpointRequest,
        arrival: EndpointRequest,
    ) -> Self {
        Self {
            traveler_id,
            departure,
            arrival,
            return_at: None,
        }
    }

    /// Sets the return time.
    #[must_use]
    pub const fn with_return_at(mut self, return_at: DateTime<Utc>) -> Self {
        self.return_at = Some(return_at);
        self
    }

    /// Returns the owning traveler.
    #[must_use]
    pub const fn traveler_id(&self) -> TravelerId {
        self.traveler_id
    }
}

/// Partial schedule change for an existing trip.
///
/// Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescheduleRequest {
    departure_at: Option<DateTime<Utc>>,
    arrival_at: Option<DateTime<Utc>>,
    return_at: Option<Option<DateTime<Utc>>>,
}

impl RescheduleRequest {
    /// Creates an empty change.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the departure.
    #[must_use]
    pub const fn with_departure_at(mut self, at: DateTime<Utc>) -> Self {
        self.departure_at = Some(at);
        self
    }

    /// Moves the arrival.
    #[must_use]
    pub const fn with_arrival_at(mut self, at: DateTime<Utc>) -> Self {
        self.arrival_at = Some(at);
        self
    }

    /// Sets a new return time.
    #[must_use]
    pub const fn with_return_at(mut self, at: DateTime<Utc>) -> Self {
        self.return_at = Some(Some(at));
        self
    }

    /// Turns the trip into a one-way trip.
    #[must_use]
    pub const fn without_return(mut self) -> Self {
        self.return_at = Some(None);
        self
    }
}

/// Request payload for adding a segment to a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSegmentRequest {
    trip_id: TripId,
    departure: EndpointRequest,
    arrival: EndpointRequest,
    order: u32,
}

impl AddSegmentRequest {
    /// Creates a segment request.
    #[must_use]
    pub const fn new(
        trip_id: TripId,
        departure: EndpointRequest,
        arrival: EndpointRequest,
        order: u32,
    ) -> Self {
        Self {
            trip_id,
            departure,
            arrival,
            order,
        }
    }
}

/// Service-level errors for itinerary operations.
#[derive(Debug, Error)]
pub enum ItineraryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TripDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TripRepositoryError),
}

/// Result type for itinerary service operations.
pub type ItineraryResult<T> = Result<T, ItineraryError>;

/// Trip and segment orchestration service.
#[derive(Clone)]
pub struct ItineraryService<R, C>
where
    R: TripRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ItineraryService<R, C>
where
    R: TripRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new itinerary service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a new trip.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Domain`] when an endpoint or the schedule
    /// is invalid and [`ItineraryError::Repository`] when persistence fails.
    pub async fn create_trip(&self, request: CreateTripRequest) -> ItineraryResult<Trip> {
        let CreateTripRequest {
            traveler_id,
            departure,
            arrival,
            return_at,
        } = request;

        let trip = Trip::new(
            traveler_id,
            departure.into_endpoint()?,
            arrival.into_endpoint()?,
            return_at,
            &*self.clock,
        )?;
        self.repository.store(&trip).await?;
        info!(
            trip_id = %trip.id(),
            traveler_id = %trip.traveler_id(),
            from = %trip.departure().airport(),
            to = %trip.arrival().airport(),
            "trip recorded"
        );
        Ok(trip)
    }

    /// Finds a trip by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Repository`] when lookup fails.
    pub async fn find_trip(&self, id: TripId) -> ItineraryResult<Option<Trip>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a trip, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TripRepositoryError::NotFound`] wrapped in
    /// [`ItineraryError::Repository`] when the trip does not exist.
    pub async fn require_trip(&self, id: TripId) -> ItineraryResult<Trip> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItineraryError::Repository(TripRepositoryError::NotFound(id)))
    }

    /// Returns the traveler's trips ordered by departure time.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Repository`] when lookup fails.
    pub async fn trips_for_traveler(&self, traveler_id: TravelerId) -> ItineraryResult<Vec<Trip>> {
        Ok(self.repository.list_for_traveler(traveler_id).await?)
    }

    /// Applies a schedule change to a trip.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Domain`] when the resulting schedule is out
    /// of order and [`ItineraryError::Repository`] when the trip does not
    /// exist or persistence fails.
    pub async fn reschedule_trip(
        &self,
        id: TripId,
        change: RescheduleRequest,
    ) -> ItineraryResult<Trip> {
        let mut trip = self.require_trip(id).await?;
        let departure_at = change.departure_at.unwrap_or_else(|| trip.departure().at());
        let arrival_at = change.arrival_at.unwrap_or_else(|| trip.arrival().at());
        let return_at = change.return_at.unwrap_or_else(|| trip.return_at());

        trip.reschedule(departure_at, arrival_at, return_at, &*self.clock)?;
        self.repository.update(&trip).await?;
        debug!(trip_id = %id, "trip rescheduled");
        Ok(trip)
    }

    /// Deletes a trip and its segments.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Repository`] when the trip does not exist or
    /// persistence fails.
    pub async fn delete_trip(&self, id: TripId) -> ItineraryResult<()> {
        self.repository.delete(id).await?;
        info!(trip_id = %id, "trip deleted");
        Ok(())
    }

    /// Adds a segment to an existing trip.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Domain`] when an endpoint is invalid, or
    /// [`ItineraryError::Repository`] when the trip does not exist or the
    /// order is already used on that trip.
    pub async fn add_segment(&self, request: AddSegmentRequest) -> ItineraryResult<Segment> {
        let AddSegmentRequest {
            trip_id,
            departure,
            arrival,
            order,
        } = request;

        let segment = Segment::new(
            trip_id,
            departure.into_endpoint()?,
            arrival.into_endpoint()?,
            SegmentOrder::new(order),
        )?;
        self.repository.store_segment(&segment).await?;
        debug!(trip_id = %trip_id, segment_id = %segment.id(), order, "segment added");
        Ok(segment)
    }

    /// Removes a segment.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Repository`] when the segment does not exist
    /// or persistence fails.
    pub async fn remove_segment(&self, id: SegmentId) -> ItineraryResult<()> {
        Ok(self.repository.delete_segment(id).await?)
    }

    /// Returns the segments of a trip sorted by order.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Repository`] when lookup fails.
    pub async fn segments_for_trip(&self, trip_id: TripId) -> ItineraryResult<Vec<Segment>> {
        Ok(self.repository.segments_for_trip(trip_id).await?)
    }
}
