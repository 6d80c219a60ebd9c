//! Bulk import of reference seed documents.

use crate::reference::{
    domain::{Climate, Country, CountryUnion, ReferenceDomainError, ReferenceSeed},
    ports::{CatalogError, ReferenceDataStore},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for reference data import.
#[derive(Debug, Error)]
pub enum ReferenceServiceError {
    /// A seed entry failed validation.
    #[error(transparent)]
    Domain(#[from] ReferenceDomainError),
    /// The store rejected a write.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Counts of records written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Country records written.
    pub countries: usize,
    /// Climate records written.
    pub climates: usize,
    /// Union records written.
    pub unions: usize,
}

/// Reference data maintenance service.
#[derive(Clone)]
pub struct ReferenceDataService<S>
where
    S: ReferenceDataStore,
{
    store: Arc<S>,
}

impl<S> ReferenceDataService<S>
where
    S: ReferenceDataStore,
{
    /// Creates a new reference data service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validates and writes every record of `seed`.
    ///
    /// Validation happens for the whole document before the first write, so
    /// an invalid entry leaves the store untouched. Records with a name that
    /// already exists replace the stored version.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceServiceError::Domain`] when an entry is invalid and
    /// [`ReferenceServiceError::Catalog`] when a write fails.
    pub async fn import(&self, seed: &ReferenceSeed) -> Result<ImportSummary, ReferenceServiceError> {
        let countries = seed
            .countries
            .iter()
            .map(|entry| entry.to_domain())
            .collect::<Result<Vec<Country>, _>>()?;
        let climates = seed
            .climates
            .iter()
            .map(|entry| entry.to_domain())
            .collect::<Result<Vec<Climate>, _>>()?;
        let unions = seed
            .unions
            .iter()
            .map(|entry| entry.to_domain())
            .collect::<Result<Vec<CountryUnion>, _>>()?;

        for country in &countries {
            debug!(country = %country.name(), "upserting country");
            self.store.upsert_country(country).await?;
        }
        for climate in &climates {
            self.store.upsert_climate(climate).await?;
        }
        for union in &unions {
            debug!(union = union.name(), members = union.members().len(), "upserting union");
            self.store.upsert_union(union).await?;
        }

        let summary = ImportSummary {
            countries: countries.len(),
            climates: climates.len(),
            unions: unions.len(),
        };
        info!(
            countries = summary.countries,
            climates = summary.climates,
            unions = summary.unions,
            "reference data imported"
        );
        Ok(summary)
    }
}
