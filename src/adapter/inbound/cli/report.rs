//! Handlers for the `report` command group.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{fetch_snapshot, load_snapshot, now, output, write_file};
use crate::application::report::{
    performance_report, stable_report, warehouse_report, ReportHeader,
};
use crate::domain::Overview;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::QueryName;

pub const WAREHOUSE_REPORT_FILE: &str = "report_results.txt";

/// `<dir>/<prefix>_YYYYmmdd_HHMMSS.txt` for the current time.
fn stamped(dir: &Path, prefix: &str) -> PathBuf {
    dir.join(format!("{prefix}_{}.txt", now().format("%Y%m%d_%H%M%S")))
}

/// Execute `report warehouse`.
pub fn execute_warehouse(config: &Config, output_path: Option<&Path>) -> Result<()> {
    let target = config.target()?;
    let snapshot = fetch_snapshot(config, false)?;
    let header = ReportHeader::new(target.database_name(), target.host(), &config.roster());
    let text = warehouse_report(&snapshot, &header, &QueryName::FLEET, now());

    let path = output_path.map_or_else(
        || config.reporting.output_dir.join(WAREHOUSE_REPORT_FILE),
        Path::to_path_buf,
    );
    write_file(&path, &text)?;
    info!(path = %path.display(), "warehouse report written");

    output::section("Warehouse Report");
    output::success("All reports saved");
    output::field("Path", path.display());
    output::field("Queries", QueryName::FLEET.len());
    if !snapshot.failures.is_empty() {
        output::field("Failed", snapshot.failures.len());
    }
    Ok(())
}

/// Execute `report performance`.
pub fn execute_performance(config: &Config, from_snapshot: bool) -> Result<()> {
    let snapshot = load_snapshot(config, from_snapshot, false)?;
    let thresholds = config.thresholds();
    let overview = Overview::merge(&config.roster(), &snapshot, &thresholds);
    let text = performance_report(&overview, &thresholds, now());

    let path = stamped(&config.reporting.output_dir, "bot_performance_report");
    write_file(&path, &text)?;
    info!(path = %path.display(), bots = overview.len(), "performance report written");

    output::success("Report generated successfully");
    output::field("Saved to", path.display());
    output::report("performance", &text);
    Ok(())
}

/// Execute `report stable`.
pub fn execute_stable(config: &Config, from_snapshot: bool) -> Result<()> {
    let snapshot = load_snapshot(config, from_snapshot, true)?;
    let text = stable_report(&config.roster(), &snapshot, now());

    let path = stamped(&config.reporting.output_dir, "stable_report");
    write_file(&path, &text)?;
    info!(path = %path.display(), "stable report written");

    output::success("Stable report generated");
    output::field("Saved to", path.display());
    output::report("stable", &text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamped_names_carry_the_prefix() {
        let path = stamped(Path::new("reports"), "stable_report");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("stable_report_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(name.len(), "stable_report_20251002_120000.txt".len());
        assert!(path.starts_with("reports"));
    }
}
