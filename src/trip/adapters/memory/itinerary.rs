//! Thread-safe in-memory trip repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traveler::domain::TravelerId;
use crate::trip::{
    domain::{Segment, SegmentId, Trip, TripId},
    ports::{TripRepository, TripRepositoryError, TripRepositoryResult},
};

/// Thread-safe in-memory trip repository.
///
/// Traveler references are not checked.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTripRepository {
    state: Arc<RwLock<InMemoryTripState>>,
}

#[derive(Debug, Default)]
struct InMemoryTripState {
    trips: HashMap<TripId, Trip>,
    segments: HashMap<SegmentId, Segment>,
}

impl InMemoryTripRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TripRepositoryResult<RwLockReadGuard<'_, InMemoryTripState>> {
        self.state.read().map_err(|err| {
            TripRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TripRepositoryResult<RwLockWriteGuard<'_, InMemoryTripState>> {
        self.state.write().map_err(|err| {
            TripRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn store(&self, trip: &Trip) -> TripRepositoryResult<()> {
        let mut state = self.write()?;
        if state.trips.contains_key(&trip.id()) {
            return Err(TripRepositoryError::DuplicateTrip(trip.id()));
        }
        state.trips.insert(trip.id(), trip.clone());
        Ok(())
    }

    async fn update(&self, trip: &Trip) -> TripRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .trips
            .get_mut(&trip.id())
            .ok_or(TripRepositoryError::NotFound(trip.id()))?;
        *stored = trip.clone();
        Ok(())
    }

    async fn delete(&self, id: TripId) -> TripRepositoryResult<()> {
        let mut state = self.write()?;
        if state.trips.remove(&id).is_none() {
            return Err(TripRepositoryError::NotFound(id));
        }
        state.segments.retain(|_, segment| segment.trip_id() != id);
        Ok(())
    }

    async fn find_by_id(&self, id: TripId) -> TripRepositoryResult<Option<Trip>> {
        Ok(self.read()?.trips.get(&id).cloned())
    }

    async fn list_for_traveler(&self, traveler_id: TravelerId) -> TripRepositoryResult<Vec<Trip>> {
        let state = self.read()?;
        let mut trips: Vec<Trip> = state
            .trips
            .values()
            .filter(|trip| trip.traveler_id() == traveler_id)
            .cloned()
            .collect();
        trips.sort_by_key(|trip| (trip.departure().at(), trip.created_at()));
        Ok(trips)
    }

    async fn store_segment(&self, segment: &Segment) -> TripRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.trips.contains_key(&segment.trip_id()) {
            return Err(TripRepositoryError::NotFound(segment.trip_id()));
        }
        if state.segments.contains_key(&segment.id()) {
            return Err(TripRepositoryError::DuplicateSegment(segment.id()));
        }
        let order_taken = state
            .segments
            .values()
            .any(|stored| stored.trip_id() == segment.trip_id() && stored.order() == segment.order());
        if order_taken {
            return Err(TripRepositoryError::DuplicateSegmentOrder {
                trip_id: segment.trip_id(),
                order: segment.order(),
            });
        }
        state.segments.insert(segment.id(), segment.clone());
        Ok(())
    }

    async fn delete_segment(&self, id: SegmentId) -> TripRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .segments
            .remove(&id)
            .map(|_| ())
            .ok_or(TripRepositoryError::SegmentNotFound(id))
    }

    async fn segments_for_trip(&self, trip_id: TripId) -> TripRepositoryResult<Vec<Segment>> {
        let state = self.read()?;
        let mut segments: Vec<Segment> = state
            .segments
            .values()
            .filter(|segment| segment.trip_id() == trip_id)
            .cloned()
            .collect();
        segments.sort_by_key(Segment::order);
        Ok(segments)
    }
}
