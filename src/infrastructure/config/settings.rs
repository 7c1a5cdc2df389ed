//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Values come
//! from `paddock.toml`, then environment variables (usually from `.env`)
//! override them:
//!
//! | Variable       | Overrides               |
//! |----------------|-------------------------|
//! | `DATABASE_URL` | `database.url`          |
//! | `DB_HOST`      | `database.host`         |
//! | `DB_PORT`      | `database.port`         |
//! | `DB_USER`      | `database.user`         |
//! | `DB_PASS`      | password (env only)     |
//! | `DB_NAME`      | `database.name`         |
//! | `BOT_USER_IDS` | roster selection        |
//!
//! # Example
//!
//! ```no_run
//! use paddock::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("paddock.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use super::reporting::ReportingConfig;
use super::roster::RosterConfig;
use super::snapshot::SnapshotConfig;
use crate::adapter::outbound::snapshot::FileSnapshotStore;
use crate::adapter::outbound::warehouse::{DatabaseTarget, DieselWarehouse};
use crate::domain::{RatingThresholds, Roster};
use crate::error::{ConfigError, Result};
use crate::port::outbound::warehouse::FetchRequest;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub roster: RosterConfig,
    pub reporting: ReportingConfig,
    pub snapshot: SnapshotConfig,
    pub logging: LoggingConfig,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    /// Parse configuration from TOML content, then apply the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, an environment value cannot
    /// be parsed, or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, env_var)
    }

    /// Like [`Config::parse_toml`] with an explicit variable lookup.
    pub fn parse_toml_with_env<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Config::parse_toml`] fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path`, or fall back to built-in defaults when it does not exist
    /// and was not asked for explicitly.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            return Self::parse_toml("");
        }
        Self::load(path)
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(host) = lookup("DB_HOST") {
            self.database.host = Some(host);
        }
        if let Some(port) = lookup("DB_PORT") {
            self.database.port =
                port.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "DB_PORT",
                        reason: format!("'{port}' is not a port number"),
                    })?;
        }
        if let Some(user) = lookup("DB_USER") {
            self.database.user = Some(user);
        }
        if let Some(name) = lookup("DB_NAME") {
            self.database.name = Some(name);
        }
        // Never read from the config file.
        self.database.password = lookup("DB_PASS");

        if let Some(ids) = lookup("BOT_USER_IDS") {
            self.roster.select_from_env(&ids)?;
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Connection details are checked separately by
    /// [`Config::validate_connection`] so that snapshot-only commands work
    /// without a warehouse.
    pub fn validate(&self) -> Result<()> {
        if self.database.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.port",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        self.roster.validate()?;
        self.reporting.validate()?;
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got \"{}\"", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Check that the warehouse can be addressed.
    pub fn validate_connection(&self) -> Result<()> {
        self.database.target().map(|_| ())
    }

    pub fn target(&self) -> Result<DatabaseTarget> {
        self.database.target()
    }

    pub fn warehouse(&self) -> Result<DieselWarehouse> {
        Ok(DieselWarehouse::new(self.target()?))
    }

    #[must_use]
    pub fn roster(&self) -> Roster {
        self.roster.roster()
    }

    #[must_use]
    pub fn thresholds(&self) -> RatingThresholds {
        self.reporting.thresholds()
    }

    /// The fetch everything in this configuration asks for.
    #[must_use]
    pub fn fetch_request(&self, include_horses: bool) -> FetchRequest {
        FetchRequest::new(self.roster(), self.reporting.since)
            .with_in_play_window(self.reporting.in_play_window_hours)
            .with_horses(include_horses)
    }

    #[must_use]
    pub fn snapshot_store(&self) -> FileSnapshotStore {
        self.snapshot.store()
    }

    /// Initialize logging based on configuration and the `-v` count.
    pub fn init_logging(&self, verbose: u8) {
        self.logging.init(verbose);
    }
}
