//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use super::diagnostic;
use super::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../paddock.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Put DB_PASS (and any other DB_* overrides) in .env");
    output::note(&format!(
        "3. Run: paddock --config {} check warehouse",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path, explicit: bool) -> Result<()> {
    let config = Config::load_or_default(path, explicit)?;

    output::section("Effective Configuration");
    if path.exists() {
        output::field("File", path.display());
    } else {
        output::field("File", "(none, using defaults)");
    }

    output::section("Database");
    match config.target() {
        Ok(target) => output::field("Target", target.redacted()),
        Err(e) => output::warning(&format!("Not configured: {e}")),
    }
    output::field("Port", config.database.port);
    output::field(
        "Password",
        if config.database.password.is_some() {
            "set (DB_PASS)"
        } else {
            "not set"
        },
    );

    output::section("Roster");
    for bot in config.roster().bots() {
        output::field(&bot.name, bot.id);
    }

    output::section("Reporting");
    output::field("Since", config.reporting.since);
    output::field(
        "In-play",
        config
            .reporting
            .in_play_window_hours
            .map_or_else(|| "all open stakes".to_string(), |h| format!("last {h}h")),
    );
    output::field("Excellent", format!("> {} IGGT", config.reporting.excellent_threshold));
    output::field("Good", format!("> {} IGGT", config.reporting.good_threshold));
    output::field("Output dir", config.reporting.output_dir.display());

    output::section("Snapshot");
    output::field("Data file", config.snapshot.data_file.display());
    output::field("Timestamp", config.snapshot.timestamp_file.display());
    output::field("Backups", config.snapshot.backup_dir.display());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
///
/// Syntax and schema errors are rendered against the file with a label under
/// the offending span.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());

    let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
    if let Err(err) = toml::from_str::<Config>(&content) {
        if !output::is_json() {
            eprintln!("{}", diagnostic::ConfigError::from_toml(&err, &content).render());
        }
        return Err(ConfigError::Parse(err).into());
    }

    let config = Config::parse_toml(&content)?;
    output::success("Config file is valid");

    if let Err(e) = config.validate_connection() {
        output::section("Warnings");
        output::warning(&format!("warehouse connection incomplete: {e}"));
        output::hint("set DATABASE_URL, or DB_HOST, DB_USER and DB_NAME in .env");
    }

    output::field(
        "Next",
        format!("paddock --config {} config show", path.display()),
    );
    Ok(())
}
