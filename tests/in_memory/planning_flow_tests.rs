//! End-to-end checklist generation over in-memory adapters.

use super::helpers::{Harness, at, harness, titles, trip_request};
use chrono::{NaiveDate, TimeDelta};
use rstest::rstest;
use travelprep::planning::services::PlanningError;
use travelprep::traveler::domain::TravelerId;
use travelprep::trip::services::RescheduleRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn long_haul_round_trip_follows_rule_order(#[future] harness: Harness) {
    let ctx = harness.await;
    let departure_at = at(2026, 7, 1, 8);
    let request = trip_request(TravelerId::new(), ("France", "CDG"), ("Japan", "HND"), departure_at, 14)
        .with_return_at(departure_at + TimeDelta::days(10));

    let planned = ctx.planner.create_trip(request).await.expect("trip planned");

    assert_eq!(
        titles(&planned.tasks),
        vec![
            "Check Passport Validity Date",
            "Japan's Visa Needed",
            "Check your vaccines (+)",
            "Check vaccines for Japan",
            "Check climate in Japan (+)",
            "Flight Must Have !",
            "Check your banking fees",
            "Check repatriation insurance",
            "Check cabin baggage dimensions",
            "Labels on your baggage",
            "Make copies of your papers.",
        ]
    );
    let vaccines = planned.tasks.get(2).expect("vaccine list task");
    assert_eq!(vaccines.comments(), Some("Hepatitis A\nJapanese encephalitis"));
    assert_eq!(vaccines.deadline(), NaiveDate::from_ymd_opt(2026, 5, 17));
    assert!(planned.tasks.iter().all(|task| task.origin().is_generated()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn trip_inside_visa_free_union_needs_no_visa(#[future] harness: Harness) {
    let ctx = harness.await;
    let departure_at = at(2026, 9, 3, 7);
    let request = trip_request(TravelerId::new(), ("France", "ORY"), ("Germany", "BER"), departure_at, 1)
        .with_return_at(departure_at + TimeDelta::days(3));

    let planned = ctx.planner.create_trip(request).await.expect("trip planned");
    let found = titles(&planned.tasks);

    assert!(found.contains(&"No Visa Needed"));
    assert!(!found.iter().any(|title| title.ends_with("Visa Needed") && *title != "No Visa Needed"));
    assert!(found.contains(&"Check meteo"));
    let flight = planned
        .tasks
        .iter()
        .find(|task| task.title().as_str() == "Flight Must Have !")
        .expect("flight task");
    assert_eq!(
        flight.comments(),
        Some("Take some food and some drinks for your flight")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn arriving_in_union_with_common_visa_offers_it(#[future] harness: Harness) {
    let ctx = harness.await;
    let request = trip_request(TravelerId::new(), ("Japan", "NRT"), ("France", "CDG"), at(2026, 8, 10, 10), 13)
        .with_return_at(at(2026, 8, 20, 10));

    let planned = ctx.planner.create_trip(request).await.expect("trip planned");
    let found = titles(&planned.tasks);

    let union_visa = found
        .iter()
        .position(|title| *title == "Schengen Area Visa or")
        .expect("union visa task");
    let national_visa = found
        .iter()
        .position(|title| *title == "France's Visa Needed")
        .expect("national visa task");
    assert_eq!(union_visa + 1, national_visa);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_destination_falls_back_to_generic_advice(#[future] harness: Harness) {
    let ctx = harness.await;
    let request = trip_request(TravelerId::new(), ("France", "CDG"), ("Atlantis", "ATL"), at(2026, 7, 1, 8), 5)
        .with_return_at(at(2026, 7, 5, 8));

    let planned = ctx.planner.create_trip(request).await.expect("trip planned");

    assert_eq!(
        titles(&planned.tasks),
        vec![
            "Check Passport Validity Date",
            "Visa may be needed.",
            "Check meteo",
            "Flight Must Have !",
            "Check your banking fees",
            "Check cabin baggage dimensions",
            "Labels on your baggage",
            "Make copies of your papers.",
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_way_trip_to_malaria_country(#[future] harness: Harness) {
    let ctx = harness.await;
    let request = trip_request(TravelerId::new(), ("France", "CDG"), ("brazil", "GRU"), at(2026, 7, 1, 8), 12);

    let planned = ctx.planner.create_trip(request).await.expect("trip planned");
    let found = titles(&planned.tasks);

    assert!(found.contains(&"Brazil's Visa Needed"));
    assert!(!found.iter().any(|title| title.ends_with("Visa or")));
    assert!(found.contains(&"Protection for mosquito bites"));
    assert_eq!(found.last(), Some(&"Long travel To-Do"));
    let insurance = planned
        .tasks
        .iter()
        .find(|task| task.title().as_str() == "Check repatriation insurance")
        .expect("insurance task");
    assert_eq!(
        insurance.comments(),
        Some("It seems to be recommended for this country !")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rescheduling_regenerates_for_new_schedule(#[future] harness: Harness) {
    let ctx = harness.await;
    let departure_at = at(2026, 7, 1, 8);
    let request = trip_request(TravelerId::new(), ("France", "CDG"), ("Japan", "HND"), departure_at, 14)
        .with_return_at(departure_at + TimeDelta::days(10));
    let planned = ctx.planner.create_trip(request).await.expect("trip planned");
    let trip_id = planned.trip.id();

    let moved = ctx
        .planner
        .reschedule_trip(trip_id, RescheduleRequest::new().with_return_at(departure_at + TimeDelta::days(30)))
        .await
        .expect("trip rescheduled");

    assert_eq!(moved.tasks.len(), planned.tasks.len() + 1);
    assert_eq!(titles(&moved.tasks).last(), Some(&"Long travel To-Do"));
    let stored = ctx
        .checklist
        .tasks_for_trip(trip_id)
        .await
        .expect("tasks listed");
    assert_eq!(stored.len(), moved.tasks.len());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generating_twice_is_rejected(#[future] harness: Harness) {
    let ctx = harness.await;
    let request = trip_request(TravelerId::new(), ("France", "CDG"), ("Germany", "BER"), at(2026, 7, 1, 8), 1);
    let planned = ctx.planner.create_trip(request).await.expect("trip planned");

    let result = ctx.planner.generate_tasks(planned.trip.id()).await;

    assert!(matches!(
        result,
        Err(PlanningError::AlreadyGenerated(id)) if id == planned.trip.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn trip_document_without_traveler_is_planned(#[future] harness: Harness) {
    let ctx = harness.await;
    let request: travelprep::trip::services::CreateTripRequest =
        serde_json::from_str(include_str!("../fixtures/trip_paris_tokyo.json"))
            .expect("trip document parses");

    let planned = ctx.planner.create_trip(request).await.expect("trip planned");

    assert_eq!(planned.trip.arrival().airport().as_str(), "HND");
    assert_eq!(planned.tasks.len(), 11);
}
