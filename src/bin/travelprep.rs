//! Command-line front end.
//!
//! Usage:
//!
//! ```text
//! travelprep [--config <file>] plan --trip <trip.json> [--reference <seed.json>] [--format text|json]
//! travelprep [--config <file>] migrate
//! travelprep [--config <file>] seed --reference <seed.json>
//! ```
//!
//! A trip document looks like:
//!
//! ```json
//! {
//!   "departure": { "country": "France", "airport": "CDG", "at": "2026-07-01T08:00:00Z" },
//!   "arrival": { "country": "Japan", "airport": "HND", "at": "2026-07-01T22:00:00Z" },
//!   "return_at": "2026-07-12T10:00:00Z"
//! }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{Connection, ConnectionError};
use mockable::DefaultClock;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use travelprep::{
    config::{SettingsError, TravelPrepConfig},
    planning::services::{PlannedTrip, PlanningError, TripPlanningService},
    reference::{
        adapters::{
            memory::InMemoryCountryCatalog,
            postgres::PostgresCountryCatalog,
            seed_file::{SeedFileError, read_utf8_file},
        },
        domain::ReferenceSeed,
        services::{ReferenceDataService, ReferenceServiceError},
    },
    schema_migrations,
    task::{adapters::memory::InMemoryTaskRepository, domain::Task},
    telemetry::{TelemetryError, init_tracing},
    trip::{adapters::memory::InMemoryTripRepository, services::CreateTripRequest},
};

#[derive(Debug, Parser)]
#[command(name = "travelprep", version, about = "Travel preparation checklists")]
struct Cli {
    /// Configuration file; defaults to `travelprep.toml` when present.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints the checklist generated for a trip document.
    Plan {
        /// JSON trip document.
        #[arg(long)]
        trip: Utf8PathBuf,
        /// JSON reference seed; falls back to `reference.seed_path`.
        #[arg(long)]
        reference: Option<Utf8PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Creates the database schema.
    Migrate,
    /// Imports a reference seed into the database.
    Seed {
        /// JSON reference seed.
        #[arg(long)]
        reference: Utf8PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    SeedFile(#[from] SeedFileError),
    #[error("invalid trip document '{path}': {source}")]
    TripDocument {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Planning(#[from] PlanningError),
    #[error(transparent)]
    Import(#[from] ReferenceServiceError),
    #[error("failed to connect to the database: {0}")]
    Connect(#[from] ConnectionError),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("migration failed: {0}")]
    Migration(#[from] diesel::result::Error),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("failed to serialise output: {0}")]
    Serialise(#[source] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Serialize)]
struct ChecklistItem<'a> {
    title: &'a str,
    comments: Option<&'a str>,
    deadline: Option<NaiveDate>,
    completed: bool,
}

impl<'a> From<&'a Task> for ChecklistItem<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            title: task.title().as_str(),
            comments: task.comments(),
            deadline: task.deadline(),
            completed: task.is_completed(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = TravelPrepConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    match cli.command {
        Command::Plan {
            trip,
            reference,
            format,
        } => {
            let seed_path = seed_path_for(reference, &config);
            plan(&config, &trip, seed_path.as_deref(), format).await
        }
        Command::Migrate => migrate(&config).await,
        Command::Seed { reference } => seed(&config, &reference).await,
    }
}

/// Picks the seed document for `plan`: the flag wins over the config.
fn seed_path_for(flag: Option<Utf8PathBuf>, config: &TravelPrepConfig) -> Option<Utf8PathBuf> {
    flag.or_else(|| config.reference.seed_path.clone())
}

async fn plan(
    config: &TravelPrepConfig,
    trip_path: &Utf8Path,
    seed_path: Option<&Utf8Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let planned = plan_trip(config, trip_path, seed_path).await?;
    render(&mut io::stdout().lock(), &planned, format)
}

async fn plan_trip(
    config: &TravelPrepConfig,
    trip_path: &Utf8Path,
    seed_path: Option<&Utf8Path>,
) -> Result<PlannedTrip, CliError> {
    let text = read_utf8_file(trip_path)?;
    let request: CreateTripRequest =
        serde_json::from_str(&text).map_err(|source| CliError::TripDocument {
            path: trip_path.to_owned(),
            source,
        })?;

    let catalog = Arc::new(InMemoryCountryCatalog::new());
    let seed = seed_path.map(ReferenceSeed::load).transpose()?.unwrap_or_default();
    import_seed(Arc::clone(&catalog), &seed).await?;

    let service = TripPlanningService::new(
        Arc::new(InMemoryTripRepository::new()),
        Arc::new(InMemoryTaskRepository::new()),
        catalog,
        Arc::new(DefaultClock),
    )
    .with_rules(config.checklist);
    Ok(service.create_trip(request).await?)
}

fn render(
    out: &mut impl Write,
    planned: &PlannedTrip,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => write_text(out, planned)?,
        OutputFormat::Json => {
            let items: Vec<ChecklistItem<'_>> =
                planned.tasks.iter().map(ChecklistItem::from).collect();
            serde_json::to_writer_pretty(&mut *out, &items).map_err(CliError::Serialise)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

async fn import_seed(
    catalog: Arc<InMemoryCountryCatalog>,
    seed: &ReferenceSeed,
) -> Result<(), CliError> {
    ReferenceDataService::new(catalog).import(seed).await?;
    Ok(())
}

fn write_text(out: &mut impl Write, planned: &PlannedTrip) -> io::Result<()> {
    let trip = &planned.trip;
    writeln!(
        out,
        "{} ({}) -> {} ({}), departing {}",
        trip.departure().country(),
        trip.departure().airport(),
        trip.arrival().country(),
        trip.arrival().airport(),
        trip.departure_date(),
    )?;
    for (index, task) in planned.tasks.iter().enumerate() {
        writeln!(out, "{:>2}. [ ] {}", index + 1, task.title().as_str())?;
        if let Some(comments) = task.comments() {
            for line in comments.lines() {
                writeln!(out, "        {line}")?;
            }
        }
        if let Some(deadline) = task.deadline() {
            writeln!(out, "        due {deadline}")?;
        }
    }
    Ok(())
}

async fn migrate(config: &TravelPrepConfig) -> Result<(), CliError> {
    let url = config.database_url()?.to_owned();
    let applied = tokio::task::spawn_blocking(move || -> Result<Vec<&'static str>, CliError> {
        let mut connection = PgConnection::establish(&url)?;
        Ok(schema_migrations::apply_all(&mut connection)?)
    })
    .await??;
    info!(count = applied.len(), "schema migrations applied");
    Ok(())
}

async fn seed(config: &TravelPrepConfig, path: &Utf8Path) -> Result<(), CliError> {
    let document = ReferenceSeed::load(path)?;
    let url = config.database_url()?.to_owned();
    let max_size = config.database.max_connections;
    let pool = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(max_size)
            .build(ConnectionManager::<PgConnection>::new(url))
    })
    .await??;

    let summary = ReferenceDataService::new(Arc::new(PostgresCountryCatalog::new(pool)))
        .import(&document)
        .await?;
    writeln!(
        io::stdout().lock(),
        "imported {} countries, {} climates, {} unions",
        summary.countries, summary.climates, summary.unions
    )?;
    Ok(())
}
