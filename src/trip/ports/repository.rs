//! Repository port for trips and their segments.

use crate::traveler::domain::TravelerId;
use crate::trip::domain::{Segment, SegmentId, SegmentOrder, Trip, TripId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for trip repository operations.
pub type TripRepositoryResult<T> = Result<T, TripRepositoryError>;

/// Trip and segment persistence contract.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Stores a new trip.
    ///
    /// # Errors
    ///
    /// Returns [`TripRepositoryError::DuplicateTrip`] when the ID exists or
    /// [`TripRepositoryError::TravelerNotFound`] when the store enforces
    /// traveler references and the owner is unknown.
    async fn store(&self, trip: &Trip) -> TripRepositoryResult<()>;

    /// Persists changes to an existing trip.
    ///
    /// # Errors
    ///
    /// Returns [`TripRepositoryError::NotFound`] when the trip does not exist.
    async fn update(&self, trip: &Trip) -> TripRepositoryResult<()>;

    /// Deletes a trip together with its segments.
    ///
    /// # Errors
    ///
    /// Returns [`TripRepositoryError::NotFound`] when the trip does not exist.
    async fn delete(&self, id: TripId) -> TripRepositoryResult<()>;

    /// Finds a trip by identifier.
    async fn find_by_id(&self, id: TripId) -> TripRepositoryResult<Option<Trip>>;

    /// Returns the traveler's trips ordered by departure time.
    async fn list_for_traveler(&self, traveler_id: TravelerId) -> TripRepositoryResult<Vec<Trip>>;

    /// Stores a new segment.
    ///
    /// # Errors
    ///
    /// Returns [`TripRepositoryError::NotFound`] when the trip does not
    /// exist, [`TripRepositoryError::DuplicateSegmentOrder`] when the order
    /// is already used on the trip, or
    /// [`TripRepositoryError::DuplicateSegment`] when the ID exists.
    async fn store_segment(&self, segment: &Segment) -> TripRepositoryResult<()>;

    /// Deletes a segment.
    ///
    /// # Errors
    ///
    /// Returns [`TripRepositoryError::SegmentNotFound`] when the segment
    /// does not exist.
    async fn delete_segment(&self, id: SegmentId) -> TripRepositoryResult<()>;

    /// Returns the segments of a trip sorted by order.
    async fn segments_for_trip(&self, trip_id: TripId) -> TripRepositoryResult<Vec<Segment>>;
}

/// Errors returned by trip repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TripRepositoryError {
    /// A trip with the same identifier already exists.
    #[error("duplicate trip identifier: {0}")]
    DuplicateTrip(TripId),

    /// The trip was not found.
    #[error("trip not found: {0}")]
    NotFound(TripId),

    /// The owning traveler does not exist.
    #[error("traveler not found: {0}")]
    TravelerNotFound(TravelerId),

    /// A segment with the same identifier already exists.
    #[error("duplicate segment identifier: {0}")]
    DuplicateSegment(SegmentId),

    /// The segment order is already used on the trip.
    #[error("trip {trip_id} already has a segment at position {order}")]
    DuplicateSegmentOrder {
        /// Trip owning both segments.
        trip_id: TripId,
        /// Conflicting position.
        order: SegmentOrder,
    },

    /// The segment was not found.
    #[error("segment not found: {0}")]
    SegmentNotFound(SegmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TripRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
