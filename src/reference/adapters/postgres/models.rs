//! Diesel row models for reference data.

use super::schema::{reference_climates, reference_countries, reference_unions};
use diesel::prelude::*;
use serde_json::Value;

/// Row for `reference_countries`, used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = reference_countries)]
#[diesel(primary_key(name_key))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CountryRow {
    /// Lower-cased lookup key.
    pub name_key: String,
    /// Display name.
    pub name: String,
    /// Whether malaria is present.
    pub malaria_presence: bool,
    /// Travel-advisory level, if known.
    pub advisory_level: Option<i16>,
    /// Vaccines JSON payload.
    pub vaccines: Value,
}

/// Row for `reference_climates`, used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = reference_climates)]
#[diesel(primary_key(country_key))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClimateRow {
    /// Lower-cased country lookup key.
    pub country_key: String,
    /// Country display name.
    pub country: String,
    /// Climate description.
    pub description: String,
}

/// Row for `reference_unions`, used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = reference_unions)]
#[diesel(primary_key(name_key))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UnionRow {
    /// Lower-cased union key.
    pub name_key: String,
    /// Union display name.
    pub name: String,
    /// Members JSON payload.
    pub members: Value,
    /// Whether members need a visa to visit each other.
    pub visa_required_between_members: bool,
    /// Whether the union issues a common visa.
    pub common_visa: bool,
}
