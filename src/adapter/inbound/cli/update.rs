//! Handler for `paddock update`: refresh the snapshot used by the static
//! dashboard and write the summary report.

use chrono::Utc;
use tracing::info;

use super::{fetch_snapshot, now, output, write_file};
use crate::application::report::{summary_report, TIMESTAMP_FORMAT};
use crate::domain::{FleetTotals, MergeScope, Overview};
use crate::error::{Result, SnapshotError};
use crate::infrastructure::config::Config;
use crate::port::SnapshotStore;

pub fn execute(config: &Config) -> Result<()> {
    output::section("Bot Performance Data Updater");

    let snapshot = fetch_snapshot(config, true)?;
    if snapshot.is_empty() {
        return Err(SnapshotError::NothingToSave.into());
    }

    let fetched_at = Utc::now();
    let saved = config.snapshot_store().save(&snapshot, fetched_at)?;

    let generated_at = now();
    let overview = Overview::merge_scoped(
        MergeScope::PnlRows,
        &config.roster(),
        &snapshot,
        &config.thresholds(),
    );
    let report_path = config.reporting.output_dir.join(format!(
        "bot_performance_report_{}.txt",
        generated_at.format("%Y%m%d_%H%M%S")
    ));
    write_file(&report_path, &summary_report(&overview, generated_at))?;
    info!(
        bots = overview.len(),
        report = %report_path.display(),
        "update complete"
    );

    let totals = FleetTotals::from_overview(&overview);
    let fleet_pnl = format!("{} IGGT", totals.total_pnl);
    let fleet_pnl = if totals.total_pnl.value().is_sign_negative() {
        output::negative(fleet_pnl)
    } else {
        output::positive(fleet_pnl)
    };

    output::section("Update Complete");
    output::field("Updated", generated_at.format(TIMESTAMP_FORMAT));
    output::field("Fleet P&L", fleet_pnl);
    output::field("Data", saved.data_file.display());
    output::field("Timestamp", saved.timestamp_file.display());
    output::field("Backup", saved.backup_file.display());
    output::field("Report", report_path.display());
    output::success("Data files ready for dashboard");
    Ok(())
}
