//! Travelers, trips and segments against `PostgreSQL`.

use super::helpers::{PgPool, TestDatabase, at, database, stored_traveler, unique};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use travelprep::traveler::{
    adapters::postgres::PostgresTravelerRepository,
    domain::TravelerId,
    ports::TravelerRepositoryError,
    services::{CreateProfileRequest, TravelerProfileError, TravelerProfileService},
};
use travelprep::trip::{
    adapters::postgres::PostgresTripRepository,
    ports::TripRepositoryError,
    services::{AddSegmentRequest, CreateTripRequest, EndpointRequest, ItineraryError, ItineraryService},
};

fn itinerary(pool: &PgPool) -> ItineraryService<PostgresTripRepository, DefaultClock> {
    ItineraryService::new(
        Arc::new(PostgresTripRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    )
}

fn paris_tokyo(traveler_id: TravelerId) -> CreateTripRequest {
    CreateTripRequest::new(
        traveler_id,
        EndpointRequest::new("France", "cdg", at(2026, 7, 1, 8)),
        EndpointRequest::new("Japan", "HND", at(2026, 7, 1, 22)),
    )
    .with_return_at(at(2026, 7, 12, 10))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn trip_round_trips_through_database(#[future] database: TestDatabase) {
    let db = database.await;
    let traveler = stored_traveler(db.pool()).await;
    let service = itinerary(db.pool());

    let created = service
        .create_trip(paris_tokyo(traveler.id()))
        .await
        .expect("trip stored");
    let found = service
        .find_trip(created.id())
        .await
        .expect("lookup succeeds")
        .expect("trip exists");

    assert_eq!(found.id(), created.id());
    assert_eq!(found.departure().airport().as_str(), "CDG");
    assert_eq!(found.return_at(), created.return_at());
    let listed = service
        .trips_for_traveler(traveler.id())
        .await
        .expect("trips listed");
    assert_eq!(listed.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn trip_for_unknown_traveler_is_rejected(#[future] database: TestDatabase) {
    let db = database.await;

    let result = itinerary(db.pool()).create_trip(paris_tokyo(TravelerId::new())).await;

    assert!(matches!(
        result,
        Err(ItineraryError::Repository(TripRepositoryError::TravelerNotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn segment_order_is_unique_per_trip(#[future] database: TestDatabase) {
    let db = database.await;
    let traveler = stored_traveler(db.pool()).await;
    let service = itinerary(db.pool());
    let trip = service
        .create_trip(paris_tokyo(traveler.id()))
        .await
        .expect("trip stored");
    let leg = |order| {
        AddSegmentRequest::new(
            trip.id(),
            EndpointRequest::new("France", "CDG", at(2026, 7, 1, 8)),
            EndpointRequest::new("Finland", "HEL", at(2026, 7, 1, 11)),
            order,
        )
    };

    let second = service.add_segment(leg(2)).await.expect("second leg stored");
    let first = service.add_segment(leg(1)).await.expect("first leg stored");
    let clash = service.add_segment(leg(2)).await;

    assert!(matches!(
        clash,
        Err(ItineraryError::Repository(TripRepositoryError::DuplicateSegmentOrder { .. }))
    ));
    let segments = service
        .segments_for_trip(trip.id())
        .await
        .expect("segments listed");
    let ids: Vec<_> = segments.iter().map(|segment| segment.id()).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);

    service.delete_trip(trip.id()).await.expect("trip deleted");
    let orphaned = service
        .segments_for_trip(trip.id())
        .await
        .expect("segments listed");
    assert!(orphaned.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_rejected(#[future] database: TestDatabase) {
    let db = database.await;
    let service = TravelerProfileService::new(
        Arc::new(PostgresTravelerRepository::new(db.pool().clone())),
        Arc::new(DefaultClock),
    );
    let username = unique("dup");
    let request = || CreateProfileRequest::new(username.clone(), vec!["Spain".to_owned()], "Spain");

    service.create_profile(request()).await.expect("first profile stored");
    let result = service.create_profile(request()).await;

    assert!(matches!(
        result,
        Err(TravelerProfileError::Repository(TravelerRepositoryError::DuplicateUsername(_)))
    ));
}
