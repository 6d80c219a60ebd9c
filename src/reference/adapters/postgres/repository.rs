//! `PostgreSQL` implementation of the reference data ports.

use super::{
    models::{ClimateRow, CountryRow, UnionRow},
    schema::{reference_climates, reference_countries, reference_unions},
};
use crate::reference::{
    domain::{AdvisoryLevel, Climate, Country, CountryName, CountryUnion, Vaccine},
    ports::{CatalogError, CatalogResult, CountryCatalog, ReferenceDataStore},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by reference data adapters.
pub type ReferencePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed country catalog.
#[derive(Debug, Clone)]
pub struct PostgresCountryCatalog {
    pool: ReferencePgPool,
}

impl PostgresCountryCatalog {
    /// Creates a new catalog from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ReferencePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CatalogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CatalogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CatalogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CatalogError::persistence)?
    }
}

#[async_trait]
impl CountryCatalog for PostgresCountryCatalog {
    async fn find_country(&self, name: &CountryName) -> CatalogResult<Option<Country>> {
        let key = name.key();
        self.run_blocking(move |connection| {
            let row = reference_countries::table
                .filter(reference_countries::name_key.eq(&key))
                .select(CountryRow::as_select())
                .first::<CountryRow>(connection)
                .optional()
                .map_err(CatalogError::persistence)?;
            row.map(row_to_country).transpose()
        })
        .await
    }

    async fn find_climate(&self, country: &CountryName) -> CatalogResult<Option<Climate>> {
        let key = country.key();
        self.run_blocking(move |connection| {
            let row = reference_climates::table
                .filter(reference_climates::country_key.eq(&key))
                .select(ClimateRow::as_select())
                .first::<ClimateRow>(connection)
                .optional()
                .map_err(CatalogError::persistence)?;
            row.map(row_to_climate).transpose()
        })
        .await
    }

    async fn unions_for(&self, country: &CountryName) -> CatalogResult<Vec<CountryUnion>> {
        let member = country.clone();
        self.run_blocking(move |connection| {
            let rows = reference_unions::table
                .order(reference_unions::name_key.asc())
                .select(UnionRow::as_select())
                .load::<UnionRow>(connection)
                .map_err(CatalogError::persistence)?;
            let unions = rows
                .into_iter()
                .map(row_to_union)
                .collect::<CatalogResult<Vec<_>>>()?;
            Ok(unions
                .into_iter()
                .filter(|union| union.contains(&member))
                .collect())
        })
        .await
    }
}

#[async_trait]
impl ReferenceDataStore for PostgresCountryCatalog {
    async fn upsert_country(&self, country: &Country) -> CatalogResult<()> {
        let row = country_to_row(country)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(reference_countries::table)
                .values(&row)
                .on_conflict(reference_countries::name_key)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(CatalogError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn upsert_climate(&self, climate: &Climate) -> CatalogResult<()> {
        let row = ClimateRow {
            country_key: climate.country().key(),
            country: climate.country().as_str().to_owned(),
            description: climate.description().to_owned(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(reference_climates::table)
                .values(&row)
                .on_conflict(reference_climates::country_key)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(CatalogError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn upsert_union(&self, union: &CountryUnion) -> CatalogResult<()> {
        let row = UnionRow {
            name_key: union.name().to_lowercase(),
            name: union.name().to_owned(),
            members: serde_json::to_value(union.members()).map_err(CatalogError::persistence)?,
            visa_required_between_members: union.visa_required_between_members(),
            common_visa: union.common_visa(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(reference_unions::table)
                .values(&row)
                .on_conflict(reference_unions::name_key)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(CatalogError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn country_to_row(country: &Country) -> CatalogResult<CountryRow> {
    Ok(CountryRow {
        name_key: country.name().key(),
        name: country.name().as_str().to_owned(),
        malaria_presence: country.malaria_presence(),
        advisory_level: country
            .advisory_level()
            .map(|level| i16::from(level.value())),
        vaccines: serde_json::to_value(country.vaccines()).map_err(CatalogError::persistence)?,
    })
}

fn row_to_country(row: CountryRow) -> CatalogResult<Country> {
    let CountryRow {
        name,
        malaria_presence,
        advisory_level,
        vaccines,
        ..
    } = row;

    let parsed_name = CountryName::new(name).map_err(CatalogError::persistence)?;
    let parsed_vaccines: Vec<Vaccine> =
        serde_json::from_value(vaccines).map_err(CatalogError::persistence)?;
    let mut country = Country::new(parsed_name)
        .with_malaria_presence(malaria_presence)
        .with_vaccines(parsed_vaccines);
    if let Some(level) = advisory_level {
        let value = u8::try_from(level).map_err(CatalogError::persistence)?;
        country = country.with_advisory_level(AdvisoryLevel::new(value));
    }
    Ok(country)
}

fn row_to_climate(row: ClimateRow) -> CatalogResult<Climate> {
    let country = CountryName::new(row.country).map_err(CatalogError::persistence)?;
    Climate::new(country, row.description).map_err(CatalogError::persistence)
}

fn row_to_union(row: UnionRow) -> CatalogResult<CountryUnion> {
    let UnionRow {
        name,
        members,
        visa_required_between_members,
        common_visa,
        ..
    } = row;

    let parsed_members: Vec<CountryName> =
        serde_json::from_value(members).map_err(CatalogError::persistence)?;
    let union = CountryUnion::new(name, parsed_members).map_err(CatalogError::persistence)?;
    Ok(union
        .with_visa_required_between_members(visa_required_between_members)
        .with_common_visa(common_visa))
}
