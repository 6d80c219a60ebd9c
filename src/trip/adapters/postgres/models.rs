//! Diesel row models for trips and segments.

use super::schema::{trip_segments, trips};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row for `trips`, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = trips)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TripRow {
    /// Trip identifier.
    pub id: uuid::Uuid,
    /// Owning traveler.
    pub traveler_id: uuid::Uuid,
    /// Departure country name.
    pub departure_country: String,
    /// Departure airport code.
    pub departure_airport: String,
    /// Departure time.
    pub departure_at: DateTime<Utc>,
    /// Arrival country name.
    pub arrival_country: String,
    /// Arrival airport code.
    pub arrival_airport: String,
    /// Arrival time.
    pub arrival_at: DateTime<Utc>,
    /// Optional return time.
    pub return_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row for `trip_segments`, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = trip_segments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SegmentRow {
    /// Segment identifier.
    pub id: uuid::Uuid,
    /// Owning trip.
    pub trip_id: uuid::Uuid,
    /// Departure country name.
    pub departure_country: String,
    /// Departure airport code.
    pub departure_airport: String,
    /// Departure time.
    pub departure_at: DateTime<Utc>,
    /// Arrival country name.
    pub arrival_country: String,
    /// Arrival airport code.
    pub arrival_airport: String,
    /// Arrival time.
    pub arrival_at: DateTime<Utc>,
    /// Position within the trip.
    pub position: i32,
}
