//! When steps for trip checklist BDD scenarios.

use super::world::{ChecklistWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the trip is planned")]
fn plan_trip(world: &mut ChecklistWorld) -> Result<(), eyre::Report> {
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

#[when("the generated tasks are regenerated")]
fn regenerate(world: &mut ChecklistWorld) -> Result<(), eyre::Report> {
    let trip_id = world.planned()?.trip.id();
    run_async(world.planner.regenerate_tasks(trip_id)).wrap_err("regenerate tasks")?;
    world.tasks =
        run_async(world.checklist.tasks_for_trip(trip_id)).wrap_err("list trip tasks")?;
    Ok(())
}
