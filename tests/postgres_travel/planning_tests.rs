//! Checklist generation persisted through Diesel.

use super::helpers::{TestDatabase, at, database, stored_traveler};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use travelprep::planning::services::TripPlanningService;
use travelprep::reference::adapters::memory::InMemoryCountryCatalog;
use travelprep::task::{
    adapters::postgres::PostgresTaskRepository,
    ports::TaskRepository,
    services::{AddTaskRequest, ChecklistService},
};
use travelprep::trip::{
    adapters::postgres::PostgresTripRepository,
    services::{CreateTripRequest, EndpointRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_tasks_keep_creation_order(#[future] database: TestDatabase) {
    let db = database.await;
    let traveler = stored_traveler(db.pool()).await;
    let trips = Arc::new(PostgresTripRepository::new(db.pool().clone()));
    let tasks = Arc::new(PostgresTaskRepository::new(db.pool().clone()));
    let clock = Arc::new(DefaultClock);
    let planner = TripPlanningService::new(
        Arc::clone(&trips),
        Arc::clone(&tasks),
        Arc::new(InMemoryCountryCatalog::new()),
        Arc::clone(&clock),
    );
    let checklist = ChecklistService::new(Arc::clone(&tasks), trips, clock);

    let planned = planner
        .create_trip(CreateTripRequest::new(
            traveler.id(),
            EndpointRequest::new("France", "CDG", at(2026, 7, 1, 8)),
            EndpointRequest::new("Atlantis", "ATL", at(2026, 7, 1, 13)),
        ))
        .await
        .expect("trip planned");
    let trip_id = planned.trip.id();
    let own = checklist
        .add_task(AddTaskRequest::new(trip_id, "Learn to swim"))
        .await
        .expect("traveler task stored");

    let stored = tasks.list_for_trip(trip_id).await.expect("tasks listed");
    let mut expected: Vec<_> = planned.tasks.iter().map(|task| task.id()).collect();
    expected.push(own.id());
    let ids: Vec<_> = stored.iter().map(|task| task.id()).collect();
    assert_eq!(ids, expected);

    let removed = planner
        .delete_generated_tasks(trip_id)
        .await
        .expect("generated tasks deleted");
    assert_eq!(removed, planned.tasks.len());

    planner.delete_trip(trip_id).await.expect("trip deleted");
    assert!(tasks.list_for_trip(trip_id).await.expect("tasks listed").is_empty());
}
