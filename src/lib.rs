//! Travelprep: trip records and generated travel preparation checklists.
//!
//! Travelers record trips between countries. For each trip the crate derives
//! a checklist of preparatory tasks (passport, visa, vaccines, weather,
//! insurance and so on) from the trip itself and from country reference
//! data. Travelers can then add their own tasks and tick items off.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//!
//! # Modules
//!
//! - [`reference`]: Countries, climates, unions and vaccines
//! - [`traveler`]: Traveler profiles
//! - [`trip`]: Trips and their ordered segments
//! - [`task`]: Checklist tasks
//! - [`planning`]: Checklist rule engine and generation service
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Tracing subscriber setup
//! - [`schema_migrations`]: Embedded SQL schema

pub mod config;
pub mod planning;
pub mod reference;
pub mod schema_migrations;
pub mod task;
pub mod telemetry;
pub mod traveler;
pub mod trip;
