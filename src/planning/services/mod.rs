//! Checklist generation services.

mod planner;

pub use planner::{PlannedTrip, PlanningError, PlanningResult, TripPlanningService};
