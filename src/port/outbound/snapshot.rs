//! Snapshot persistence port.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::Snapshot;
use crate::error::Result;

/// Files written by one save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub data_file: PathBuf,
    pub timestamp_file: PathBuf,
    pub backup_file: PathBuf,
}

/// Storage for the most recent fetch.
pub trait SnapshotStore {
    /// Persist a snapshot, its fetch time, and a timestamped backup copy.
    fn save(&self, snapshot: &Snapshot, fetched_at: DateTime<Utc>) -> Result<SavedSnapshot>;

    /// Load the latest snapshot.
    ///
    /// Fails when nothing has been saved yet or the saved data is empty.
    fn load(&self) -> Result<Snapshot>;

    /// Time of the latest save, if one is recorded.
    fn last_updated(&self) -> Result<Option<DateTime<Utc>>>;
}
