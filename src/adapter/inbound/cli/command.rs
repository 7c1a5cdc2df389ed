//! Command-line interface definitions.
//!
//! Defines the CLI structure for paddock using `clap`. Subcommands cover the
//! warehouse reports, the snapshot update, the dashboard and CSV export, and
//! configuration housekeeping.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Performance reporting for the house racing bots
#[derive(Parser, Debug)]
#[command(name = "paddock")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a report from the warehouse
    #[command(subcommand)]
    Report(ReportCommand),

    /// Fetch fresh data, save a snapshot and write the summary report
    Update,

    /// Write the HTML dashboard
    Dashboard(DashboardArgs),

    /// Write the per-bot overview as CSV
    Export(ExportArgs),

    /// Print the fleet metrics as a JSON envelope
    Fetch,

    /// Break down one horse's race history
    Horse(HorseArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Set up `.env` credentials interactively
    Init(InitArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `paddock report`.
#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Raw query results for every fleet metric.
    Warehouse(WarehouseReportArgs),
    /// Executive performance report with insights.
    Performance(SnapshotArgs),
    /// Horse-level stable report.
    Stable(SnapshotArgs),
}

/// Subcommands for `paddock check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Test the warehouse connection and count rows per table.
    Warehouse,
}

/// Subcommands for `paddock config`.
///
/// Provides configuration management utilities including generation,
/// display, and validation of configuration files.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

#[derive(Parser, Debug)]
pub struct WarehouseReportArgs {
    /// Write the report here instead of `<output_dir>/report_results.txt`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SnapshotArgs {
    /// Read the last saved snapshot instead of querying the warehouse.
    #[arg(long)]
    pub from_snapshot: bool,
}

#[derive(Parser, Debug)]
pub struct DashboardArgs {
    /// Query the warehouse instead of reading the saved snapshot.
    #[arg(long)]
    pub live: bool,

    /// Output HTML file.
    #[arg(short, long, default_value = "dashboard.html")]
    pub output: PathBuf,

    /// Also write the CSV export next to the dashboard.
    #[arg(long)]
    pub csv: bool,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output CSV file (defaults to `bot_performance_YYYYmmdd.csv`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read the last saved snapshot instead of querying the warehouse.
    #[arg(long)]
    pub from_snapshot: bool,
}

#[derive(Parser, Debug)]
pub struct HorseArgs {
    /// Warehouse id of the horse.
    pub user_horse_id: i64,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing `.env` file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Path where the configuration file will be created.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,

    /// Overwrite existing configuration file if present.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "paddock");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_color_choice_default_is_auto() {
        assert_eq!(ColorChoice::default(), ColorChoice::Auto);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["paddock", "update", "--json", "-vv", "--color", "never"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Update));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_config_flag() {
        let cli = Cli::try_parse_from(["paddock", "--config", "alt.toml", "fetch"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_parse_report_warehouse_output() {
        let cli =
            Cli::try_parse_from(["paddock", "report", "warehouse", "-o", "out.txt"]).unwrap();
        match cli.command {
            Commands::Report(ReportCommand::Warehouse(args)) => {
                assert_eq!(args.output, Some(PathBuf::from("out.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_report_performance_from_snapshot() {
        let cli = Cli::try_parse_from(["paddock", "report", "performance", "--from-snapshot"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report(ReportCommand::Performance(SnapshotArgs {
                from_snapshot: true
            }))
        ));
    }

    #[test]
    fn test_dashboard_defaults() {
        let cli = Cli::try_parse_from(["paddock", "dashboard"]).unwrap();
        match cli.command {
            Commands::Dashboard(args) => {
                assert!(!args.live);
                assert!(!args.csv);
                assert_eq!(args.output, PathBuf::from("dashboard.html"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_horse_requires_numeric_id() {
        let cli = Cli::try_parse_from(["paddock", "horse", "274848022531"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Horse(HorseArgs {
                user_horse_id: 274848022531
            })
        ));
        assert!(Cli::try_parse_from(["paddock", "horse", "tayport"]).is_err());
        assert!(Cli::try_parse_from(["paddock", "horse"]).is_err());
    }

    #[test]
    fn test_config_init_takes_path_and_force() {
        let cli = Cli::try_parse_from(["paddock", "config", "init", "custom.toml", "--force"])
            .unwrap();
        match cli.command {
            Commands::Config(ConfigCommand::Init(args)) => {
                assert_eq!(args.path, PathBuf::from("custom.toml"));
                assert!(args.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_check_warehouse() {
        let cli = Cli::try_parse_from(["paddock", "check", "warehouse"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(CheckCommand::Warehouse)));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["paddock", "run"]).is_err());
    }
}
