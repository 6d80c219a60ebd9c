//! Embedded SQL schema.
//!
//! Every script is idempotent, so applying the set to an already migrated
//! database is a no-op. The matching `down.sql` scripts are kept for manual
//! rollback.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// A named SQL script applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// Directory name under `migrations/`.
    pub name: &'static str,
    /// Forward SQL.
    pub up: &'static str,
}

/// All migrations in application order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "2026-10-19-000000_create_travel_tables",
        up: include_str!("../migrations/2026-10-19-000000_create_travel_tables/up.sql"),
    },
    Migration {
        name: "2026-10-19-000001_create_reference_tables",
        up: include_str!("../migrations/2026-10-19-000001_create_reference_tables/up.sql"),
    },
];

/// Applies every migration, returning the names applied.
///
/// # Errors
///
/// Returns the first database error; scripts that ran before it stay
/// applied.
pub fn apply_all(connection: &mut PgConnection) -> diesel::QueryResult<Vec<&'static str>> {
    let mut applied = Vec::with_capacity(MIGRATIONS.len());
    for migration in MIGRATIONS {
        tracing::debug!(migration = migration.name, "applying migration");
        connection.batch_execute(migration.up)?;
        applied.push(migration.name);
    }
    Ok(applied)
}
