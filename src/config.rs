//! Layered configuration.
//!
//! Values come from defaults, then an optional TOML file, then environment
//! variables prefixed with `TRAVELPREP_`. Nested keys use `__`, so
//! `TRAVELPREP_DATABASE__URL` sets `database.url`.

use crate::planning::domain::{ChecklistRules, InvalidChecklistRules};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Config file read when no path is given. Missing is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "travelprep.toml";

const ENV_PREFIX: &str = "TRAVELPREP";
const MAX_POOL_SIZE: u32 = 64;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPrepConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
    /// Checklist rule thresholds.
    pub checklist: ChecklistRules,
    /// Reference data settings.
    pub reference: ReferenceConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: Option<String>,
    /// Connection pool size.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 8,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `travelprep=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

/// Reference data settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Seed document used when a command is given no `--reference` flag.
    pub seed_path: Option<Utf8PathBuf>,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialised.
    #[error("failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// A checklist threshold is out of range.
    #[error(transparent)]
    Checklist(#[from] InvalidChecklistRules),

    /// A value is present but unusable.
    #[error("invalid configuration value for `{field}`: {reason}")]
    InvalidValue {
        /// Dotted key of the offending value.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A command needs a database but none is configured.
    #[error("no database configured; set `database.url` or TRAVELPREP_DATABASE__URL")]
    MissingDatabaseUrl,
}

impl TravelPrepConfig {
    /// Loads configuration from `path` (or [`DEFAULT_CONFIG_FILE`] if
    /// present) and the process environment, then validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Source`] when an explicit `path` is missing
    /// or any source is malformed, and the errors of [`Self::validate`].
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, SettingsError> {
        let file = path.map_or_else(
            || File::with_name(DEFAULT_CONFIG_FILE).required(false),
            |explicit| File::from(explicit.as_std_path()).required(true),
        );
        Self::build(
            Config::builder()
                .add_source(file.format(FileFormat::Toml))
                .add_source(environment(None)),
        )
    }

    /// Parses configuration from TOML text, with optional environment-style
    /// overrides given as `TRAVELPREP_*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Source`] when the text is malformed and the
    /// errors of [`Self::validate`].
    pub fn from_toml_str(
        text: &str,
        overrides: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        Self::build(
            Config::builder()
                .add_source(File::from_str(text, FileFormat::Toml))
                .add_source(environment(overrides)),
        )
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] for a bad pool size, blank
    /// URL or unparsable log filter, and [`SettingsError::Checklist`] for
    /// out-of-range thresholds.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_POOL_SIZE).contains(&self.database.max_connections) {
            return Err(SettingsError::InvalidValue {
                field: "database.max_connections",
                reason: format!("must be between 1 and {MAX_POOL_SIZE}"),
            });
        }
        if self
            .database
            .url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(SettingsError::InvalidValue {
                field: "database.url",
                reason: "must not be blank".to_owned(),
            });
        }
        if let Err(err) = EnvFilter::try_new(&self.logging.level) {
            return Err(SettingsError::InvalidValue {
                field: "logging.level",
                reason: err.to_string(),
            });
        }
        self.checklist.validate()?;
        Ok(())
    }

    /// Returns the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when none is set.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database
            .url
            .as_deref()
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

fn environment(source: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(source)
}
