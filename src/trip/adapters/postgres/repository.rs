//! `PostgreSQL` repository implementation for trips and segments.

use super::{
    models::{SegmentRow, TripRow},
    schema::{trip_segments, trips},
};
use crate::reference::domain::CountryName;
use crate::traveler::domain::TravelerId;
use crate::trip::{
    domain::{
        AirportCode, Endpoint, PersistedSegmentData, PersistedTripData, Segment, SegmentId,
        SegmentOrder, Trip, TripId,
    },
    ports::{TripRepository, TripRepositoryError, TripRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by trip adapters.
pub type TripPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed trip repository.
///
/// Deleting a trip relies on `ON DELETE CASCADE` to remove its segments
/// and tasks.
#[derive(Debug, Clone)]
pub struct PostgresTripRepository {
    pool: TripPgPool,
}

impl PostgresTripRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TripPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TripRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TripRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TripRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TripRepositoryError::persistence)?
    }
}

#[async_trait]
impl TripRepository for PostgresTripRepository {
    async fn store(&self, trip: &Trip) -> TripRepositoryResult<()> {
        let trip_id = trip.id();
        let traveler_id = trip.traveler_id();
        let row = trip_to_row(trip);

        self.run_blocking(move |connection| {
            diesel::insert_into(trips::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TripRepositoryError::TravelerNotFound(traveler_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TripRepositoryError::DuplicateTrip(trip_id)
                    }
                    _ => TripRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, trip: &Trip) -> TripRepositoryResult<()> {
        let trip_id = trip.id();
        let row = trip_to_row(trip);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(trips::table.filter(trips::id.eq(row.id)))
                .set((
                    trips::departure_country.eq(&row.departure_country),
                    trips::departure_airport.eq(&row.departure_airport),
                    trips::departure_at.eq(row.departure_at),
                    trips::arrival_country.eq(&row.arrival_country),
                    trips::arrival_airport.eq(&row.arrival_airport),
                    trips::arrival_at.eq(row.arrival_at),
                    trips::return_at.eq(row.return_at),
                    trips::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TripRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TripRepositoryError::NotFound(trip_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TripId) -> TripRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(trips::table.filter(trips::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TripRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(TripRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TripId) -> TripRepositoryResult<Option<Trip>> {
        self.run_blocking(move |connection| {
            let row = trips::table
                .filter(trips::id.eq(id.into_inner()))
                .select(TripRow::as_select())
                .first::<TripRow>(connection)
                .optional()
                .map_err(TripRepositoryError::persistence)?;
            row.map(row_to_trip).transpose()
        })
        .await
    }

    async fn list_for_traveler(&self, traveler_id: TravelerId) -> TripRepositoryResult<Vec<Trip>> {
        self.run_blocking(move |connection| {
            trips::table
                .filter(trips::traveler_id.eq(traveler_id.into_inner()))
                .order((trips::departure_at.asc(), trips::created_at.asc()))
                .select(TripRow::as_select())
                .load::<TripRow>(connection)
                .map_err(TripRepositoryError::persistence)?
                .into_iter()
                .map(row_to_trip)
                .collect()
        })
        .await
    }

    async fn store_segment(&self, segment: &Segment) -> TripRepositoryResult<()> {
        let trip_id = segment.trip_id();
        let segment_id = segment.id();
        let order = segment.order();
        let row = segment_to_row(segment)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(trip_segments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TripRepositoryError::NotFound(trip_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_position_unique_violation(info.as_ref()) =>
                    {
                        TripRepositoryError::DuplicateSegmentOrder { trip_id, order }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TripRepositoryError::DuplicateSegment(segment_id)
                    }
                    _ => TripRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn delete_segment(&self, id: SegmentId) -> TripRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(trip_segments::table.filter(trip_segments::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TripRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(TripRepositoryError::SegmentNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn segments_for_trip(&self, trip_id: TripId) -> TripRepositoryResult<Vec<Segment>> {
        self.run_blocking(move |connection| {
            trip_segments::table
                .filter(trip_segments::trip_id.eq(trip_id.into_inner()))
                .order(trip_segments::position.asc())
                .select(SegmentRow::as_select())
                .load::<SegmentRow>(connection)
                .map_err(TripRepositoryError::persistence)?
                .into_iter()
                .map(row_to_segment)
                .collect()
        })
        .await
    }
}

fn trip_to_row(trip: &Trip) -> TripRow {
    TripRow {
        id: trip.id().into_inner(),
        traveler_id: trip.traveler_id().into_inner(),
        departure_country: trip.departure().country().as_str().to_owned(),
        departure_airport: trip.departure().airport().as_str().to_owned(),
        departure_at: trip.departure().at(),
        arrival_country: trip.arrival().country().as_str().to_owned(),
        arrival_airport: trip.arrival().airport().as_str().to_owned(),
        arrival_at: trip.arrival().at(),
        return_at: trip.return_at(),
        created_at: trip.created_at(),
        updated_at: trip.updated_at(),
    }
}

fn row_to_trip(row: TripRow) -> TripRepositoryResult<Trip> {
    let TripRow {
        id,
        traveler_id,
        departure_country,
        departure_airport,
        departure_at,
        arrival_country,
        arrival_airport,
        arrival_at,
        return_at,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTripData {
        id: TripId::from_uuid(id),
        traveler_id: TravelerId::from_uuid(traveler_id),
        departure: endpoint_from_columns(departure_country, departure_airport, departure_at)?,
        arrival: endpoint_from_columns(arrival_country, arrival_airport, arrival_at)?,
        return_at,
        created_at,
        updated_at,
    };
    Ok(Trip::from_persisted(data))
}

fn segment_to_row(segment: &Segment) -> TripRepositoryResult<SegmentRow> {
    Ok(SegmentRow {
        id: segment.id().into_inner(),
        trip_id: segment.trip_id().into_inner(),
        departure_country: segment.departure().country().as_str().to_owned(),
        departure_airport: segment.departure().airport().as_str().to_owned(),
        departure_at: segment.departure().at(),
        arrival_country: segment.arrival().country().as_str().to_owned(),
        arrival_airport: segment.arrival().airport().as_str().to_owned(),
        arrival_at: segment.arrival().at(),
        position: i32::try_from(segment.order().value())
            .map_err(TripRepositoryError::persistence)?,
    })
}

fn row_to_segment(row: SegmentRow) -> TripRepositoryResult<Segment> {
    let SegmentRow {
        id,
        trip_id,
        departure_country,
        departure_airport,
        departure_at,
        arrival_country,
        arrival_airport,
        arrival_at,
        position,
    } = row;

    let data = PersistedSegmentData {
        id: SegmentId::from_uuid(id),
        trip_id: TripId::from_uuid(trip_id),
        departure: endpoint_from_columns(departure_country, departure_airport, departure_at)?,
        arrival: endpoint_from_columns(arrival_country, arrival_airport, arrival_at)?,
        order: SegmentOrder::new(u32::try_from(position).map_err(TripRepositoryError::persistence)?),
    };
    Ok(Segment::from_persisted(data))
}

fn endpoint_from_columns(
    country: String,
    airport: String,
    at: DateTime<Utc>,
) -> TripRepositoryResult<Endpoint> {
    Ok(Endpoint::new(
        CountryName::new(country).map_err(TripRepositoryError::persistence)?,
        AirportCode::new(airport).map_err(TripRepositoryError::persistence)?,
        at,
    ))
}

fn is_position_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_trip_segments_position_unique")
}
