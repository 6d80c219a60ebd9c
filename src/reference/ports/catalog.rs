//! Catalog ports for reading and writing reference data.

use crate::reference::domain::{Climate, Country, CountryName, CountryUnion};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read access to country reference data.
///
/// Lookups match names case-insensitively (see [`CountryName::key`]).
/// A missing record is `Ok(None)` or an empty list, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryCatalog: Send + Sync {
    /// Finds the country record with the given name.
    async fn find_country(&self, name: &CountryName) -> CatalogResult<Option<Country>>;

    /// Finds the climate description for the given country.
    async fn find_climate(&self, country: &CountryName) -> CatalogResult<Option<Climate>>;

    /// Returns every union listing the given country as a member.
    async fn unions_for(&self, country: &CountryName) -> CatalogResult<Vec<CountryUnion>>;
}

/// Write access to country reference data.
#[async_trait]
pub trait ReferenceDataStore: CountryCatalog {
    /// Inserts or replaces the country record with the same name.
    async fn upsert_country(&self, country: &Country) -> CatalogResult<()>;

    /// Inserts or replaces the climate of the same country.
    async fn upsert_climate(&self, climate: &Climate) -> CatalogResult<()>;

    /// Inserts or replaces the union with the same name.
    async fn upsert_union(&self, union: &CountryUnion) -> CatalogResult<()>;
}

/// Errors returned by catalog implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
