//! Port contracts for country reference data.
//!
//! The rule engine only reads through [`CountryCatalog`]; import tooling
//! writes through [`ReferenceDataStore`].

pub mod catalog;

pub use catalog::{CatalogError, CatalogResult, CountryCatalog, ReferenceDataStore};

#[cfg(test)]
pub use catalog::MockCountryCatalog;
