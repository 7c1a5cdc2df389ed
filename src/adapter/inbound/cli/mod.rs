//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod diagnostic;
pub mod export;
pub mod fetch;
pub mod horse;
pub mod init;
pub mod output;
pub mod paths;
pub mod report;
pub mod update;

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use self::command::{CheckCommand, Cli, Commands, ConfigCommand, ReportCommand};
use crate::domain::Snapshot;
use crate::error::Result;
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::Config;
use crate::port::{SnapshotStore, WarehouseReader};

/// Run the parsed command line.
///
/// Configuration commands and `init` run before any config is loaded, so a
/// broken `paddock.toml` can still be inspected and regenerated.
pub fn run(cli: &Cli) -> Result<()> {
    let (config_path, explicit) = paths::resolve_config(cli.config.as_deref());

    match &cli.command {
        Commands::Config(command) => {
            LoggingConfig::default().init(cli.verbose);
            match command {
                ConfigCommand::Init(args) => config::execute_init(&args.path, args.force),
                ConfigCommand::Show => config::execute_show(&config_path, explicit),
                ConfigCommand::Validate => config::execute_validate(&config_path),
            }
        }
        Commands::Init(args) => {
            LoggingConfig::default().init(cli.verbose);
            init::execute(Path::new(init::ENV_FILE), args.force)
        }
        command => {
            let config = Config::load_or_default(&config_path, explicit)?;
            config.init_logging(cli.verbose);
            debug!(path = %config_path.display(), explicit, "configuration loaded");
            dispatch(command, &config)
        }
    }
}

fn dispatch(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Report(ReportCommand::Warehouse(args)) => {
            report::execute_warehouse(config, args.output.as_deref())
        }
        Commands::Report(ReportCommand::Performance(args)) => {
            report::execute_performance(config, args.from_snapshot)
        }
        Commands::Report(ReportCommand::Stable(args)) => {
            report::execute_stable(config, args.from_snapshot)
        }
        Commands::Update => update::execute(config),
        Commands::Dashboard(args) => dashboard::execute(config, args),
        Commands::Export(args) => export::execute(config, args.output.as_deref(), args.from_snapshot),
        Commands::Fetch => fetch::execute(config),
        Commands::Horse(args) => horse::execute(config, args.user_horse_id),
        Commands::Check(CheckCommand::Warehouse) => check::execute_warehouse(config),
        Commands::Init(_) | Commands::Config(_) => Ok(()),
    }
}

/// Local wall-clock time for report stamps and file names.
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Write a generated file, creating its directory first.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "file written");
    Ok(())
}

/// Query the warehouse behind a spinner, warning about each failed query.
pub(crate) fn fetch_snapshot(config: &Config, include_horses: bool) -> Result<Snapshot> {
    let warehouse = config.warehouse()?;
    let pb = output::spinner(&format!("Querying {}...", warehouse.describe()));

    let snapshot = match warehouse.fetch(&config.fetch_request(include_horses)) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            output::spinner_fail(&pb, "Warehouse query failed");
            return Err(e);
        }
    };

    if snapshot.failures.is_empty() {
        output::spinner_success(&pb, "Fetched bot data");
    } else {
        output::spinner_success(
            &pb,
            &format!("Fetched bot data ({} queries failed)", snapshot.failures.len()),
        );
        for (query, message) in &snapshot.failures {
            output::warning(&format!("{query}: {message}"));
        }
    }
    Ok(snapshot)
}

/// The saved snapshot, or a fresh fetch.
pub(crate) fn load_snapshot(
    config: &Config,
    from_snapshot: bool,
    include_horses: bool,
) -> Result<Snapshot> {
    if from_snapshot {
        config.snapshot_store().load()
    } else {
        fetch_snapshot(config, include_horses)
    }
}
