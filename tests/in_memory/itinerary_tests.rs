//! Traveler profiles, trips and segments.

use super::helpers::{Harness, at, harness, trip_request};
use rstest::rstest;
use travelprep::traveler::services::CreateProfileRequest;
use travelprep::trip::{
    ports::TripRepositoryError,
    services::{AddSegmentRequest, EndpointRequest, ItineraryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn traveler_trips_are_listed_by_departure(#[future] harness: Harness) {
    let ctx = harness.await;
    let profile = ctx
        .profiles
        .create_profile(CreateProfileRequest::new(
            "marie",
            vec!["France".to_owned()],
            "France",
        ))
        .await
        .expect("profile created");

    let later = ctx
        .planner
        .create_trip(trip_request(profile.id(), ("France", "CDG"), ("Japan", "HND"), at(2026, 12, 1, 8), 14))
        .await
        .expect("later trip planned");
    let earlier = ctx
        .planner
        .create_trip(trip_request(profile.id(), ("France", "CDG"), ("Germany", "BER"), at(2026, 3, 1, 8), 1))
        .await
        .expect("earlier trip planned");

    let trips = ctx
        .planner
        .itinerary()
        .trips_for_traveler(profile.id())
        .await
        .expect("trips listed");
    let ids: Vec<_> = trips.iter().map(|trip| trip.id()).collect();
    assert_eq!(ids, vec![earlier.trip.id(), later.trip.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn segments_are_sorted_and_orders_unique(#[future] harness: Harness) {
    let ctx = harness.await;
    let planned = ctx
        .planner
        .create_trip(trip_request(
            travelprep::traveler::domain::TravelerId::new(),
            ("France", "CDG"),
            ("Japan", "HND"),
            at(2026, 7, 1, 8),
            16,
        ))
        .await
        .expect("trip planned");
    let trip_id = planned.trip.id();
    let itinerary = ctx.planner.itinerary();

    let second = itinerary
        .add_segment(AddSegmentRequest::new(
            trip_id,
            EndpointRequest::new("Finland", "HEL", at(2026, 7, 1, 13)),
            EndpointRequest::new("Japan", "HND", at(2026, 7, 2, 0)),
            2,
        ))
        .await
        .expect("second leg added");
    let first = itinerary
        .add_segment(AddSegmentRequest::new(
            trip_id,
            EndpointRequest::new("France", "CDG", at(2026, 7, 1, 8)),
            EndpointRequest::new("Finland", "HEL", at(2026, 7, 1, 11)),
            1,
        ))
        .await
        .expect("first leg added");
    let clash = itinerary
        .add_segment(AddSegmentRequest::new(
            trip_id,
            EndpointRequest::new("Finland", "HEL", at(2026, 7, 1, 14)),
            EndpointRequest::new("Japan", "NRT", at(2026, 7, 2, 1)),
            2,
        ))
        .await;

    assert!(matches!(
        clash,
        Err(ItineraryError::Repository(TripRepositoryError::DuplicateSegmentOrder { .. }))
    ));
    let segments = itinerary
        .segments_for_trip(trip_id)
        .await
        .expect("segments listed");
    let ids: Vec<_> = segments.iter().map(|segment| segment.id()).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);

    ctx
        .planner
        .delete_trip(trip_id)
        .await
        .expect("trip deleted");
    let orphaned = itinerary
        .segments_for_trip(trip_id)
        .await
        .expect("segments listed");
    assert!(orphaned.is_empty());
}
