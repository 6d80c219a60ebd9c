//! Service that keeps a trip's generated checklist in step with the trip.

use crate::planning::domain::{ChecklistRules, PlanningContext, TaskFactory};
use crate::reference::{
    domain::{Country, CountryName},
    ports::{CatalogError, CountryCatalog},
};
use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskOrigin},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::trip::{
    domain::{Trip, TripId},
    ports::TripRepository,
    services::{CreateTripRequest, ItineraryError, ItineraryService, RescheduleRequest},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// A trip together with its freshly generated tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTrip {
    /// The stored trip.
    pub trip: Trip,
    /// The generated tasks, in rule order.
    pub tasks: Vec<Task>,
}

/// Service-level errors for checklist generation.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// The trip already has generated tasks.
    #[error("trip {0} already has generated tasks")]
    AlreadyGenerated(TripId),
    /// Trip operation failed.
    #[error(transparent)]
    Itinerary(#[from] ItineraryError),
    /// A rule produced an invalid task.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Reference data lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for planning service operations.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Trip planning orchestration service.
///
/// Trip storage goes through an [`ItineraryService`]; generated tasks are
/// written as one batch.
#[derive(Clone)]
pub struct TripPlanningService<R, K, G, C>
where
    R: TripRepository,
    K: TaskRepository,
    G: CountryCatalog,
    C: Clock + Send + Sync,
{
    itinerary: ItineraryService<R, C>,
    tasks: Arc<K>,
    catalog: Arc<G>,
    clock: Arc<C>,
    factory: TaskFactory,
}

impl<R, K, G, C> TripPlanningService<R, K, G, C>
where
    R: TripRepository,
    K: TaskRepository,
    G: CountryCatalog,
    C: Clock + Send + Sync,
{
    /// Creates a planning service using the default thresholds.
    #[must_use]
    pub fn new(trips: Arc<R>, tasks: Arc<K>, catalog: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            itinerary: ItineraryService::new(trips, Arc::clone(&clock)),
            tasks,
            catalog,
            clock,
            factory: TaskFactory::default(),
        }
    }

    /// Replaces the checklist thresholds.
    #[must_use]
    pub const fn with_rules(mut self, rules: ChecklistRules) -> Self {
        self.factory = TaskFactory::new(rules);
        self
    }

    /// Returns the underlying itinerary service.
    #[must_use]
    pub const fn itinerary(&self) -> &ItineraryService<R, C> {
        &self.itinerary
    }

    /// Records a trip and generates its checklist.
    ///
    /// The trip stays stored if generation fails afterwards; call
    /// [`Self::generate_tasks`] again once the cause is fixed.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Itinerary`] when the trip is invalid or
    /// cannot be stored, and any error of [`Self::generate_tasks`].
    pub async fn create_trip(&self, request: CreateTripRequest) -> PlanningResult<PlannedTrip> {
        let trip = self.itinerary.create_trip(request).await?;
        let tasks = self.generate_for(&trip).await?;
        Ok(PlannedTrip { trip, tasks })
    }

    /// Generates the checklist of a trip that has no generated tasks yet.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::AlreadyGenerated`] when generated tasks
    /// exist, [`PlanningError::Itinerary`] when the trip does not exist, or
    /// [`PlanningError::Catalog`] when reference data cannot be read.
    pub async fn generate_tasks(&self, trip_id: TripId) -> PlanningResult<Vec<Task>> {
        let trip = self.itinerary.require_trip(trip_id).await?;
        let existing = self.tasks.list_for_trip(trip_id).await?;
        if existing.iter().any(|task| task.origin().is_generated()) {
            return Err(PlanningError::AlreadyGenerated(trip_id));
        }
        self.generate_for(&trip).await
    }

    /// Deletes the generated tasks of a trip and returns how many were
    /// removed. Traveler tasks are kept.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Repository`] when persistence fails.
    pub async fn delete_generated_tasks(&self, trip_id: TripId) -> PlanningResult<usize> {
        let removed = self.tasks.delete_generated_for_trip(trip_id).await?;
        info!(trip_id = %trip_id, removed, "generated tasks deleted");
        Ok(removed)
    }

    /// Replaces the generated tasks of a trip with a fresh batch.
    ///
    /// Traveler tasks, and their completion state, are kept. The new batch
    /// is built before anything is deleted, so a failure leaves the previous
    /// checklist untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Itinerary`] when the trip does not exist and
    /// any error of [`Self::generate_tasks`] except `AlreadyGenerated`.
    pub async fn regenerate_tasks(&self, trip_id: TripId) -> PlanningResult<Vec<Task>> {
        let trip = self.itinerary.require_trip(trip_id).await?;
        self.replace_for(&trip).await
    }

    /// Moves a trip and regenerates its checklist for the new schedule.
    ///
    /// If regeneration fails the trip keeps its new schedule and its
    /// previous generated tasks; [`Self::regenerate_tasks`] brings them up
    /// to date.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Itinerary`] when the schedule is invalid or
    /// the trip does not exist, and any error of [`Self::regenerate_tasks`].
    pub async fn reschedule_trip(
        &self,
        trip_id: TripId,
        change: RescheduleRequest,
    ) -> PlanningResult<PlannedTrip> {
        let trip = self.itinerary.reschedule_trip(trip_id, change).await?;
        let tasks = self.replace_for(&trip).await?;
        Ok(PlannedTrip { trip, tasks })
    }

    /// Deletes every task of a trip, then the trip itself.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Itinerary`] when the trip does not exist or
    /// [`PlanningError::Repository`] when task deletion fails.
    pub async fn delete_trip(&self, trip_id: TripId) -> PlanningResult<()> {
        self.itinerary.require_trip(trip_id).await?;
        let removed = self.tasks.delete_all_for_trip(trip_id).await?;
        self.itinerary.delete_trip(trip_id).await?;
        info!(trip_id = %trip_id, removed_tasks = removed, "trip and tasks deleted");
        Ok(())
    }

    /// Returns the drafts the rules would generate for `trip`, without
    /// storing anything.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Catalog`] when reference data cannot be read.
    pub async fn preview(&self, trip: &Trip) -> PlanningResult<Vec<TaskDraft>> {
        let context = self.context_for(trip).await?;
        Ok(self.factory.drafts(&context))
    }

    async fn generate_for(&self, trip: &Trip) -> PlanningResult<Vec<Task>> {
        let tasks = self.build_tasks(trip).await?;
        self.tasks.store_all(&tasks).await?;
        info!(trip_id = %trip.id(), generated = tasks.len(), "checklist generated");
        Ok(tasks)
    }

    async fn replace_for(&self, trip: &Trip) -> PlanningResult<Vec<Task>> {
        let tasks = self.build_tasks(trip).await?;
        let removed = self
            .tasks
            .replace_generated_for_trip(trip.id(), &tasks)
            .await?;
        info!(
            trip_id = %trip.id(),
            removed,
            generated = tasks.len(),
            "checklist regenerated"
        );
        Ok(tasks)
    }

    async fn build_tasks(&self, trip: &Trip) -> PlanningResult<Vec<Task>> {
        let drafts = self.preview(trip).await?;
        Ok(drafts
            .into_iter()
            .map(|draft| Task::from_draft(trip.id(), draft, TaskOrigin::Generated, &*self.clock))
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn context_for(&self, trip: &Trip) -> PlanningResult<PlanningContext> {
        let departure = trip.departure().country();
        let arrival = trip.arrival().country();

        let departure_country = self.lookup_country(departure).await?;
        let arrival_country = self.lookup_country(arrival).await?;
        let arrival_climate = self.catalog.find_climate(arrival).await?;
        let departure_unions = self.catalog.unions_for(departure).await?;
        let arrival_unions = self.catalog.unions_for(arrival).await?;

        Ok(PlanningContext::new(trip.clone())
            .with_departure_country(departure_country)
            .with_arrival_country(arrival_country)
            .with_arrival_climate(arrival_climate)
            .with_departure_unions(departure_unions)
            .with_arrival_unions(arrival_unions))
    }

    async fn lookup_country(&self, name: &CountryName) -> PlanningResult<Option<Country>> {
        let found = self.catalog.find_country(name).await?;
        if found.is_none() {
            warn!(country = %name, "no reference data for country");
        }
        Ok(found)
    }
}
