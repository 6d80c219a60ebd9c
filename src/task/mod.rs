//! Checklist tasks attached to trips.
//!
//! A task is one item of a traveler's to-do list before departure. Tasks
//! are either generated by the checklist rules or written by the traveler;
//! generated tasks can be deleted and re-created as a batch without touching
//! the traveler's own items. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
