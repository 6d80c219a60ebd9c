//! `PostgreSQL` adapters for reference data persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresCountryCatalog, ReferencePgPool};
