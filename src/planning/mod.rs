//! Checklist generation for trips.
//!
//! [`domain::TaskFactory`] turns a trip and whatever reference data is known
//! about its countries into task drafts. Every rule is independent and a
//! missing reference record only changes the advice given, never fails the
//! run. [`services::TripPlanningService`] stores the drafts as generated tasks
//! and replaces them when the trip changes.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
