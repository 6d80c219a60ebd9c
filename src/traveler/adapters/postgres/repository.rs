//! `PostgreSQL` repository implementation for traveler profiles.

use super::{models::TravelerRow, schema::travelers};
use crate::reference::domain::CountryName;
use crate::traveler::{
    domain::{PersistedProfileData, PhoneNumber, TravelerId, TravelerProfile, Username},
    ports::{TravelerRepository, TravelerRepositoryError, TravelerRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by traveler adapters.
pub type TravelerPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed traveler repository.
#[derive(Debug, Clone)]
pub struct PostgresTravelerRepository {
    pool: TravelerPgPool,
}

impl PostgresTravelerRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TravelerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TravelerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TravelerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TravelerRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TravelerRepositoryError::persistence)?
    }
}

#[async_trait]
impl TravelerRepository for PostgresTravelerRepository {
    async fn store(&self, profile: &TravelerProfile) -> TravelerRepositoryResult<()> {
        let traveler_id = profile.id();
        let username = profile.username().clone();
        let row = to_row(profile)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(travelers::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_username_unique_violation(info.as_ref()) =>
                    {
                        TravelerRepositoryError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TravelerRepositoryError::DuplicateTraveler(traveler_id)
                    }
                    _ => TravelerRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &TravelerProfile) -> TravelerRepositoryResult<()> {
        let traveler_id = profile.id();
        let username = profile.username().clone();
        let row = to_row(profile)?;

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(travelers::table.filter(travelers::id.eq(row.id)))
                    .set((
                        travelers::username.eq(&row.username),
                        travelers::nationalities.eq(&row.nationalities),
                        travelers::residence_country.eq(&row.residence_country),
                        travelers::birth_date.eq(row.birth_date),
                        travelers::address.eq(&row.address),
                        travelers::phone.eq(&row.phone),
                        travelers::visited_countries.eq(&row.visited_countries),
                        travelers::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TravelerRepositoryError::DuplicateUsername(username.clone())
                        }
                        _ => TravelerRepositoryError::persistence(err),
                    })?;

            if updated_count == 0 {
                return Err(TravelerRepositoryError::NotFound(traveler_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TravelerId) -> TravelerRepositoryResult<Option<TravelerProfile>> {
        self.run_blocking(move |connection| {
            let row = travelers::table
                .filter(travelers::id.eq(id.into_inner()))
                .select(TravelerRow::as_select())
                .first::<TravelerRow>(connection)
                .optional()
                .map_err(TravelerRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> TravelerRepositoryResult<Option<TravelerProfile>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = travelers::table
                .filter(travelers::username.eq(&lookup))
                .select(TravelerRow::as_select())
                .first::<TravelerRow>(connection)
                .optional()
                .map_err(TravelerRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }
}

fn to_row(profile: &TravelerProfile) -> TravelerRepositoryResult<TravelerRow> {
    Ok(TravelerRow {
        id: profile.id().into_inner(),
        username: profile.username().as_str().to_owned(),
        nationalities: serde_json::to_value(profile.nationalities())
            .map_err(TravelerRepositoryError::persistence)?,
        residence_country: profile.residence_country().as_str().to_owned(),
        birth_date: profile.birth_date(),
        address: profile.address().map(str::to_owned),
        phone: profile.phone().map(|phone| phone.as_str().to_owned()),
        visited_countries: serde_json::to_value(profile.visited_countries())
            .map_err(TravelerRepositoryError::persistence)?,
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    })
}

fn row_to_profile(row: TravelerRow) -> TravelerRepositoryResult<TravelerProfile> {
    let TravelerRow {
        id,
        username,
        nationalities,
        residence_country,
        birth_date,
        address,
        phone,
        visited_countries,
        created_at,
        updated_at,
    } = row;

    let data = PersistedProfileData {
        id: TravelerId::from_uuid(id),
        username: Username::new(username).map_err(TravelerRepositoryError::persistence)?,
        nationalities: serde_json::from_value::<Vec<CountryName>>(nationalities)
            .map_err(TravelerRepositoryError::persistence)?,
        residence_country: CountryName::new(residence_country)
            .map_err(TravelerRepositoryError::persistence)?,
        birth_date,
        address,
        phone: phone
            .map(PhoneNumber::new)
            .transpose()
            .map_err(TravelerRepositoryError::persistence)?,
        visited_countries: serde_json::from_value::<Vec<CountryName>>(visited_countries)
            .map_err(TravelerRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(TravelerProfile::from_persisted(data))
}

fn is_username_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_travelers_username_unique")
}
