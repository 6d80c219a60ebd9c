//! Port contracts for trip persistence.

pub mod repository;

pub use repository::{TripRepository, TripRepositoryError, TripRepositoryResult};
