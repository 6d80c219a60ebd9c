//! Diesel row models for traveler profiles.

use super::schema::travelers;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Row for `travelers`, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = travelers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TravelerRow {
    /// Traveler identifier.
    pub id: uuid::Uuid,
    /// Unique username.
    pub username: String,
    /// Nationalities JSON payload.
    pub nationalities: Value,
    /// Country of residence.
    pub residence_country: String,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Postal address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Visited countries JSON payload.
    pub visited_countries: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
