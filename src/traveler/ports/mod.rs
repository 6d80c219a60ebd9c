//! Port contracts for traveler profiles.

pub mod repository;

pub use repository::{TravelerRepository, TravelerRepositoryError, TravelerRepositoryResult};
