//! Traveler-authored tasks living next to generated ones.

use super::helpers::{Harness, at, harness, titles, trip_request};
use chrono::NaiveDate;
use rstest::rstest;
use travelprep::task::{
    domain::TaskEdit,
    ports::TaskRepositoryError,
    services::{AddTaskRequest, ChecklistError},
};
use travelprep::traveler::domain::TravelerId;
use travelprep::trip::{domain::TripId, ports::TripRepositoryError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn traveler_task_survives_regeneration(#[future] harness: Harness) {
    let ctx = harness.await;
    let request = trip_request(TravelerId::new(), ("France", "CDG"), ("Japan", "HND"), at(2026, 7, 1, 8), 14);
    let planned = ctx.planner.create_trip(request).await.expect("trip planned");
    let trip_id = planned.trip.id();

    let own = ctx
        .checklist
        .add_task(
            AddTaskRequest::new(trip_id, "Buy a rail pass")
                .with_deadline(NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")),
        )
        .await
        .expect("task added");
    ctx.checklist.complete(own.id()).await.expect("task completed");

    let regenerated = ctx
        .planner
        .regenerate_tasks(trip_id)
        .await
        .expect("tasks regenerated");
    let all = ctx
        .checklist
        .tasks_for_trip(trip_id)
        .await
        .expect("tasks listed");

    assert_eq!(all.len(), regenerated.len() + 1);
    let kept = all
        .iter()
        .find(|task| task.id() == own.id())
        .expect("traveler task kept");
    assert!(kept.is_completed());
    assert!(!kept.origin().is_generated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hidden_and_edited_tasks(#[future] harness: Harness) {
    let ctx = harness.await;
    let request = trip_request(TravelerId::new(), ("France", "CDG"), ("Germany", "BER"), at(2026, 7, 1, 8), 1);
    let planned = ctx.planner.create_trip(request).await.expect("trip planned");
    let trip_id = planned.trip.id();
    let banking = planned
        .tasks
        .iter()
        .find(|task| task.title().as_str() == "Check your banking fees")
        .expect("banking task");

    ctx
        .checklist
        .set_visibility(banking.id(), false)
        .await
        .expect("task hidden");
    let passport = planned.tasks.first().expect("passport task");
    let edited = ctx
        .checklist
        .edit_task(
            passport.id(),
            TaskEdit::new()
                .with_title("Renew passport")
                .with_comments(None),
        )
        .await
        .expect("task edited");

    let visible = ctx
        .checklist
        .visible_tasks_for_trip(trip_id)
        .await
        .expect("tasks listed");
    assert_eq!(visible.len(), planned.tasks.len() - 1);
    assert!(!titles(&visible).contains(&"Check your banking fees"));
    assert_eq!(edited.title().as_str(), "Renew passport");
    assert_eq!(edited.comments(), None);
    assert_eq!(titles(&visible).first(), Some(&"Renew passport"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_trip_removes_every_task(#[future] harness: Harness) {
    let ctx = harness.await;
    let request = trip_request(TravelerId::new(), ("France", "CDG"), ("Japan", "HND"), at(2026, 7, 1, 8), 14);
    let planned = ctx.planner.create_trip(request).await.expect("trip planned");
    let trip_id = planned.trip.id();
    let own = ctx
        .checklist
        .add_task(AddTaskRequest::new(trip_id, "Pack adapters"))
        .await
        .expect("task added");

    ctx.planner.delete_trip(trip_id).await.expect("trip deleted");

    let remaining = ctx
        .checklist
        .tasks_for_trip(trip_id)
        .await
        .expect("tasks listed");
    assert!(remaining.is_empty());
    assert!(matches!(
        ctx.checklist.complete(own.id()).await,
        Err(ChecklistError::Repository(TaskRepositoryError::NotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_for_unknown_trip_is_rejected(#[future] harness: Harness) {
    let ctx = harness.await;

    let result = ctx
        .checklist
        .add_task(AddTaskRequest::new(TripId::new(), "Orphan"))
        .await;

    assert!(matches!(
        result,
        Err(ChecklistError::Trip(TripRepositoryError::NotFound(_)))
    ));
}
