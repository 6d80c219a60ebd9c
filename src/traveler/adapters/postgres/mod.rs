//! `PostgreSQL` adapters for traveler profile persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTravelerRepository, TravelerPgPool};
