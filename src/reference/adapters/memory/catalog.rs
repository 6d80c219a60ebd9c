//! Thread-safe in-memory country catalog.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::reference::{
    domain::{Climate, Country, CountryName, CountryUnion},
    ports::{CatalogError, CatalogResult, CountryCatalog, ReferenceDataStore},
};

/// In-memory country catalog keyed by normalised names.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCountryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    countries: HashMap<String, Country>,
    climates: HashMap<String, Climate>,
    unions: BTreeMap<String, CountryUnion>,
}

impl InMemoryCountryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CatalogResult<std::sync::RwLockReadGuard<'_, InMemoryCatalogState>> {
        self.state
            .read()
            .map_err(|err| CatalogError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> CatalogResult<std::sync::RwLockWriteGuard<'_, InMemoryCatalogState>> {
        self.state
            .write()
            .map_err(|err| CatalogError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl CountryCatalog for InMemoryCountryCatalog {
    async fn find_country(&self, name: &CountryName) -> CatalogResult<Option<Country>> {
        let state = self.read()?;
        Ok(state.countries.get(&name.key()).cloned())
    }

    async fn find_climate(&self, country: &CountryName) -> CatalogResult<Option<Climate>> {
        let state = self.read()?;
        Ok(state.climates.get(&country.key()).cloned())
    }

    async fn unions_for(&self, country: &CountryName) -> CatalogResult<Vec<CountryUnion>> {
        let state = self.read()?;
        Ok(state
            .unions
            .values()
            .filter(|union| union.contains(country))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReferenceDataStore for InMemoryCountryCatalog {
    async fn upsert_country(&self, country: &Country) -> CatalogResult<()> {
        let mut state = self.write()?;
        state.countries.insert(country.name().key(), country.clone());
        Ok(())
    }

    async fn upsert_climate(&self, climate: &Climate) -> CatalogResult<()> {
        let mut state = self.write()?;
        state.climates.insert(climate.country().key(), climate.clone());
        Ok(())
    }

    async fn upsert_union(&self, union: &CountryUnion) -> CatalogResult<()> {
        let mut state = self.write()?;
        state.unions.insert(union.name().to_lowercase(), union.clone());
        Ok(())
    }
}
