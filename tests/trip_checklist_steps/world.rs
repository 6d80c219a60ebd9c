//! Shared world state for trip checklist BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use travelprep::{
    planning::services::{PlannedTrip, TripPlanningService},
    reference::adapters::memory::InMemoryCountryCatalog,
    task::{adapters::memory::InMemoryTaskRepository, domain::Task, services::ChecklistService},
    traveler::domain::TravelerId,
    trip::{
        adapters::memory::InMemoryTripRepository,
        services::{CreateTripRequest, EndpointRequest},
    },
};

/// Reference seed loaded by the background step.
pub const SEED_JSON: &str = include_str!("../fixtures/reference_seed.json");

/// Planner type used by the BDD world.
pub type TestPlanner = TripPlanningService<
    InMemoryTripRepository,
    InMemoryTaskRepository,
    InMemoryCountryCatalog,
    DefaultClock,
>;

/// Checklist service type used by the BDD world.
pub type TestChecklist =
    ChecklistService<InMemoryTaskRepository, InMemoryTripRepository, DefaultClock>;

/// Trip described by `Given` steps before it is planned.
pub struct PendingTrip {
    /// Departure country.
    pub from: String,
    /// Arrival country.
    pub to: String,
    /// Departure time.
    pub departure_at: DateTime<Utc>,
    /// Flight length.
    pub flight: TimeDelta,
    /// Stay length, if the trip returns.
    pub stay: Option<TimeDelta>,
}

impl PendingTrip {
    /// Builds the request the planner receives.
    pub fn to_request(&self) -> CreateTripRequest {
        let arrival_at = self.departure_at + self.flight;
        let mut request = CreateTripRequest::new(
            TravelerId::new(),
            EndpointRequest::new(self.from.as_str(), "AAA", self.departure_at),
            EndpointRequest::new(self.to.as_str(), "BBB", arrival_at),
        );
        if let Some(stay) = self.stay {
            request = request.with_return_at(arrival_at + stay);
        }
        request
    }
}

/// Scenario world for checklist behaviour tests.
pub struct ChecklistWorld {
    /// Reference catalog shared with the planner.
    pub catalog: Arc<InMemoryCountryCatalog>,
    /// Planning service under test.
    pub planner: TestPlanner,
    /// Traveler task service sharing the planner's repositories.
    pub checklist: TestChecklist,
    /// Trip queued by `Given` steps.
    pub pending_trip: Option<PendingTrip>,
    /// Result of the last planning call.
    pub planned: Option<PlannedTrip>,
    /// Tasks of the trip after the last `When` step.
    pub tasks: Vec<Task>,
}

impl ChecklistWorld {
    /// Creates a world with empty repositories and catalog.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let trips = Arc::new(InMemoryTripRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let catalog = Arc::new(InMemoryCountryCatalog::new());
        Self {
            planner: TripPlanningService::new(
                Arc::clone(&trips),
                Arc::clone(&tasks),
                Arc::clone(&catalog),
                Arc::clone(&clock),
            ),
            checklist: ChecklistService::new(tasks, trips, clock),
            catalog,
            pending_trip: None,
            planned: None,
            tasks: Vec::new(),
        }
    }

    /// Returns the planned trip or an error naming the missing step.
    pub fn planned(&self) -> Result<&PlannedTrip, eyre::Report> {
        self.planned
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no trip has been planned in this scenario"))
    }
}

impl Default for ChecklistWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ChecklistWorld {
    ChecklistWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses an ISO date and returns 08:00 UTC on that day.
pub fn morning_of(date: &str) -> Result<DateTime<Utc>, eyre::Report> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
    let time = day
        .and_hms_opt(8, 0, 0)
        .ok_or_else(|| eyre::eyre!("08:00 is not a valid time on {date}"))?;
    Ok(time.and_utc())
}
