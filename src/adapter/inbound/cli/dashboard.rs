//! Handler for `paddock dashboard`.

use chrono::Utc;
use tracing::info;

use super::command::DashboardArgs;
use super::{fetch_snapshot, now, output, write_file};
use crate::application::dashboard::{render_dashboard, DashboardModel, DashboardSource};
use crate::application::export::{csv_export, default_csv_name};
use crate::domain::{MergeScope, Overview, Snapshot};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::{SnapshotStore, WarehouseReader};

pub fn execute(config: &Config, args: &DashboardArgs) -> Result<()> {
    let (snapshot, source, last_updated) = if args.live {
        let database = config.warehouse()?.describe();
        let snapshot = fetch_snapshot(config, false)?;
        (snapshot, DashboardSource::Live { database }, Some(Utc::now()))
    } else {
        static_source(config)?
    };

    let overview = Overview::merge_scoped(
        MergeScope::PnlRows,
        &config.roster(),
        &snapshot,
        &config.thresholds(),
    );
    let generated_at = now();
    let model = DashboardModel {
        overview,
        daily: snapshot.daily_pnl,
        source,
        last_updated,
        generated_at,
    };

    write_file(&args.output, &render_dashboard(&model))?;
    info!(path = %args.output.display(), bots = model.overview.len(), "dashboard written");

    output::section("Dashboard");
    output::success("Dashboard written");
    output::field("Path", args.output.display());
    output::field("Bots", model.overview.len());
    if model.last_updated.is_none() {
        output::warning("No update timestamp found");
        output::hint("run `paddock update` to record one");
    }

    if args.csv {
        let csv_path = args
            .output
            .with_file_name(default_csv_name(generated_at.date()));
        write_file(&csv_path, &csv_export(&model.overview))?;
        output::field("CSV", csv_path.display());
    }
    Ok(())
}

type StaticSource = (
    Snapshot,
    DashboardSource,
    Option<chrono::DateTime<Utc>>,
);

fn static_source(config: &Config) -> Result<StaticSource> {
    let store = config.snapshot_store();
    let snapshot = store.load()?;
    let last_updated = store.last_updated()?;
    let source = DashboardSource::Static {
        data_file: store.data_file().display().to_string(),
    };
    Ok((snapshot, source, last_updated))
}
