//! Handler for `paddock export`.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{load_snapshot, now, output, write_file};
use crate::application::export::{csv_export, default_csv_name};
use crate::domain::{MergeScope, Overview};
use crate::error::Result;
use crate::infrastructure::config::Config;

pub fn execute(config: &Config, output_path: Option<&Path>, from_snapshot: bool) -> Result<()> {
    let snapshot = load_snapshot(config, from_snapshot, false)?;
    let overview = Overview::merge_scoped(
        MergeScope::PnlRows,
        &config.roster(),
        &snapshot,
        &config.thresholds(),
    );

    let path = output_path.map_or_else(
        || PathBuf::from(default_csv_name(now().date())),
        Path::to_path_buf,
    );
    write_file(&path, &csv_export(&overview))?;
    info!(path = %path.display(), rows = overview.len(), "csv export written");

    output::success("CSV export written");
    output::field("Path", path.display());
    output::field("Rows", overview.len());
    Ok(())
}
