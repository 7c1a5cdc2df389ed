//! JSON snapshot files on local disk.
//!
//! Layout:
//! - `bot_data.json` - the latest snapshot, pretty JSON
//! - `last_updated.txt` - RFC 3339 time of the latest save
//! - `backups/backup_bot_data_YYYYmmdd_HHMMSS.json` - one copy per save

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::Snapshot;
use crate::error::{Result, SnapshotError};
use crate::port::outbound::snapshot::{SavedSnapshot, SnapshotStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshotStore {
    data_file: PathBuf,
    timestamp_file: PathBuf,
    backup_dir: PathBuf,
}

impl FileSnapshotStore {
    #[must_use]
    pub fn new(
        data_file: impl Into<PathBuf>,
        timestamp_file: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            data_file: data_file.into(),
            timestamp_file: timestamp_file.into(),
            backup_dir: backup_dir.into(),
        }
    }

    /// Default file names under one directory.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join("bot_data.json"),
            dir.join("last_updated.txt"),
            dir.join("backups"),
        )
    }

    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    #[must_use]
    pub fn backup_path(&self, at: DateTime<Utc>) -> PathBuf {
        self.backup_dir
            .join(format!("backup_bot_data_{}.json", at.format("%Y%m%d_%H%M%S")))
    }
}

/// Write through a temp file and rename, so readers never see a partial file.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;

    let cleanup_and_err = |e| {
        let _ = fs::remove_file(&temp_path);
        e
    };

    file.write_all(content).map_err(cleanup_and_err)?;
    file.sync_all().map_err(cleanup_and_err)?;
    fs::rename(&temp_path, path).map_err(cleanup_and_err)?;
    Ok(())
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, snapshot: &Snapshot, fetched_at: DateTime<Utc>) -> Result<SavedSnapshot> {
        let json = serde_json::to_string_pretty(snapshot)?;

        write_atomic(&self.data_file, json.as_bytes())?;
        debug!(path = %self.data_file.display(), "snapshot written");

        write_atomic(&self.timestamp_file, fetched_at.to_rfc3339().as_bytes())?;

        let backup_file = self.backup_path(fetched_at);
        write_atomic(&backup_file, json.as_bytes())?;
        info!(backup = %backup_file.display(), "snapshot backed up");

        Ok(SavedSnapshot {
            data_file: self.data_file.clone(),
            timestamp_file: self.timestamp_file.clone(),
            backup_file,
        })
    }

    fn load(&self) -> Result<Snapshot> {
        let path = self.data_file.display().to_string();
        let content = match fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SnapshotError::Missing { path }.into());
            }
            Err(e) => {
                return Err(SnapshotError::Unreadable {
                    path,
                    reason: e.to_string(),
                }
                .into());
            }
        };

        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| SnapshotError::Unreadable {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if snapshot.is_empty() {
            return Err(SnapshotError::Empty { path }.into());
        }
        Ok(snapshot)
    }

    fn last_updated(&self) -> Result<Option<DateTime<Utc>>> {
        let content = match fs::read_to_string(&self.timestamp_file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        DateTime::parse_from_rfc3339(content.trim())
            .map(|at| Some(at.with_timezone(&Utc)))
            .map_err(|e| {
                SnapshotError::Unreadable {
                    path: self.timestamp_file.display().to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn backup_name_uses_compact_timestamp() {
        let store = FileSnapshotStore::in_dir(Path::new("data"));
        let at = Utc.with_ymd_and_hms(2025, 10, 2, 14, 5, 9).unwrap();
        assert_eq!(
            store.backup_path(at),
            Path::new("data/backups/backup_bot_data_20251002_140509.json")
        );
    }

    #[test]
    fn last_updated_is_none_before_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::in_dir(dir.path());
        assert!(store.last_updated().unwrap().is_none());
    }
}
