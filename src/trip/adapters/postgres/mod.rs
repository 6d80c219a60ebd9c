//! `PostgreSQL` adapters for trip persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTripRepository, TripPgPool};
