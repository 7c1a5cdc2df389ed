//! Where `paddock update` keeps its files.

use std::path::PathBuf;

use serde::Deserialize;

use crate::adapter::outbound::snapshot::FileSnapshotStore;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub data_file: PathBuf,
    pub timestamp_file: PathBuf,
    pub backup_dir: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("bot_data.json"),
            timestamp_file: PathBuf::from("last_updated.txt"),
            backup_dir: PathBuf::from("backups"),
        }
    }
}

impl SnapshotConfig {
    #[must_use]
    pub fn store(&self) -> FileSnapshotStore {
        FileSnapshotStore::new(
            self.data_file.clone(),
            self.timestamp_file.clone(),
            self.backup_dir.clone(),
        )
    }
}
