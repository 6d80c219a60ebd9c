//! Shared helpers for `PostgreSQL` integration tests.

use super::cluster::{BoxError, PostgresCluster, shared_cluster};
use chrono::{DateTime, TimeZone, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use travelprep::schema_migrations;
use travelprep::traveler::{
    adapters::postgres::PostgresTravelerRepository, domain::TravelerProfile,
    services::{CreateProfileRequest, TravelerProfileService},
};
use travelprep::trip::{
    adapters::postgres::PostgresTripRepository,
    domain::Trip,
    services::{CreateTripRequest, EndpointRequest, ItineraryService},
};
use uuid::Uuid;

/// Database carrying the migrated schema; every test database is copied
/// from it.
pub const TEMPLATE_DB: &str = "travelprep_test_template";

/// Connection pool shared by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// A database private to one test, dropped with it.
pub struct TestDatabase {
    cluster: PostgresCluster,
    name: String,
    pool: PgPool,
}

impl TestDatabase {
    /// Returns the pool connected to this database.
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn create(cluster: PostgresCluster) -> Result<Self, BoxError> {
        cluster.ensure_template(TEMPLATE_DB, migrate)?;
        let name = format!("travelprep_test_{}", Uuid::new_v4().simple());
        cluster.create_database_from_template(&name, TEMPLATE_DB)?;
        let pool = Pool::builder()
            .max_size(4)
            .build(ConnectionManager::<PgConnection>::new(
                cluster.database_url(&name),
            ))
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(Self {
            cluster,
            name,
            pool,
        })
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

fn migrate(url: &str) -> Result<(), BoxError> {
    let mut connection = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    schema_migrations::apply_all(&mut connection).map_err(|err| Box::new(err) as BoxError)?;
    Ok(())
}

/// Provides a fresh migrated database on the shared embedded cluster.
///
/// Starting the cluster or copying the template blocks, so setup runs on
/// the blocking pool.
#[fixture]
pub async fn database() -> TestDatabase {
    tokio::task::spawn_blocking(|| TestDatabase::create(shared_cluster()))
        .await
        .expect("database setup task")
        .expect("test database")
}

/// Returns a UTC timestamp on the hour.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Returns `prefix` followed by a random suffix.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Stores a traveler profile with a unique username.
pub async fn stored_traveler(pool: &PgPool) -> TravelerProfile {
    let service = TravelerProfileService::new(
        Arc::new(PostgresTravelerRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    service
        .create_profile(CreateProfileRequest::new(
            unique("traveler"),
            vec!["France".to_owned()],
            "France",
        ))
        .await
        .expect("traveler stored")
}

/// Stores a Paris to Lisbon trip for a freshly stored traveler.
pub async fn stored_trip(pool: &PgPool) -> Trip {
    let traveler = stored_traveler(pool).await;
    ItineraryService::new(
        Arc::new(PostgresTripRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    )
    .create_trip(CreateTripRequest::new(
        traveler.id(),
        EndpointRequest::new("France", "ORY", at(2026, 9, 3, 7)),
        EndpointRequest::new("Portugal", "LIS", at(2026, 9, 3, 9)),
    ))
    .await
    .expect("trip stored")
}
