//! Given steps for trip checklist BDD scenarios.

use super::world::{ChecklistWorld, PendingTrip, SEED_JSON, morning_of, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use std::sync::Arc;
use travelprep::reference::{domain::ReferenceSeed, services::ReferenceDataService};
use travelprep::task::services::AddTaskRequest;

#[given("reference data for the usual destinations")]
fn reference_data(world: &mut ChecklistWorld) -> Result<(), eyre::Report> {
    let seed = ReferenceSeed::from_json_str(SEED_JSON).wrap_err("parse reference seed")?;
    run_async(ReferenceDataService::new(Arc::clone(&world.catalog)).import(&seed))
        .wrap_err("import reference seed")?;
    Ok(())
}

#[given(r#"a trip from "{from}" to "{to}" departing on "{date}" with a {hours:i64} hour flight"#)]
fn a_trip(
    world: &mut ChecklistWorld,
    from: String,
    to: String,
    date: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    world.pending_trip = Some(PendingTrip {
        from,
        to,
        departure_at: morning_of(&date)?,
        flight: TimeDelta::hours(hours),
        stay: None,
    });
    Ok(())
}

#[given("the trip returns after {days:i64} days")]
fn trip_returns(world: &mut ChecklistWorld, days: i64) -> Result<(), eyre::Report> {
    let pending = world
        .pending_trip
        .as_mut()
        .ok_or_else(|| eyre::eyre!("no pending trip in scenario world"))?;
    pending.stay = Some(TimeDelta::days(days));
    Ok(())
}

#[given("the trip has been planned")]
fn trip_planned(world: &mut ChecklistWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_trip
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no pending trip in scenario world"))?
        .to_request();
    let planned = run_async(world.planner.create_trip(request)).wrap_err("plan trip")?;
    world.tasks.clone_from(&planned.tasks);
    world.planned = Some(planned);
    Ok(())
}

#[given(r#"the traveler adds the task "{title}""#)]
fn traveler_adds_task(world: &mut ChecklistWorld, title: String) -> Result<(), eyre::Report> {
    let trip_id = world.planned()?.trip.id();
    run_async(world.checklist.add_task(AddTaskRequest::new(trip_id, title)))
        .wrap_err("add traveler task")?;
    Ok(())
}
