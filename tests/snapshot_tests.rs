//! Snapshot store round trips on a temp directory.

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use paddock::adapter::outbound::snapshot::FileSnapshotStore;
use paddock::domain::metric::BalanceRecord;
use paddock::domain::{Iggt, Snapshot, UserId};
use paddock::error::{Error, SnapshotError};
use paddock::port::SnapshotStore;

fn sample() -> Snapshot {
    let mut snapshot = Snapshot {
        total_pnl: vec![
            BalanceRecord {
                user_id: UserId(10111491),
                iggt: Iggt::new(dec!(12.345678)),
            },
            BalanceRecord {
                user_id: UserId(10211493),
                iggt: Iggt::new(dec!(-4.5)),
            },
        ],
        ..Snapshot::default()
    };
    snapshot.record_failure("races_entered", "no such table: full_WC_horse_snapshot");
    snapshot
}

#[test]
fn save_then_load_returns_the_same_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::in_dir(dir.path());
    let at = Utc.with_ymd_and_hms(2025, 10, 2, 14, 5, 9).unwrap();

    let saved = store.save(&sample(), at).unwrap();

    assert!(saved.data_file.is_file());
    assert!(saved.backup_file.is_file());
    assert_eq!(store.load().unwrap(), sample());
    assert_eq!(store.last_updated().unwrap(), Some(at));
}

#[test]
fn backup_matches_the_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::in_dir(dir.path());
    let at = Utc.with_ymd_and_hms(2025, 10, 2, 14, 5, 9).unwrap();

    let saved = store.save(&sample(), at).unwrap();

    assert!(saved
        .backup_file
        .ends_with("backups/backup_bot_data_20251002_140509.json"));
    assert_eq!(
        std::fs::read_to_string(&saved.data_file).unwrap(),
        std::fs::read_to_string(&saved.backup_file).unwrap()
    );
}

#[test]
fn later_saves_replace_the_data_and_keep_backups() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::in_dir(dir.path());
    let first = Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2025, 10, 3, 8, 0, 0).unwrap();

    store.save(&sample(), first).unwrap();
    let mut newer = sample();
    newer.total_pnl.truncate(1);
    store.save(&newer, second).unwrap();

    assert_eq!(store.load().unwrap().total_pnl.len(), 1);
    assert_eq!(store.last_updated().unwrap(), Some(second));
    let backups = std::fs::read_dir(dir.path().join("backups")).unwrap().count();
    assert_eq!(backups, 2);
}

#[test]
fn load_without_a_file_asks_for_an_update() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::in_dir(dir.path());

    let error = store.load().unwrap_err();

    assert!(matches!(error, Error::Snapshot(SnapshotError::Missing { .. })));
    assert!(error.to_string().contains("Run `paddock update` first"));
}

#[test]
fn load_of_an_empty_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::in_dir(dir.path());
    store
        .save(&Snapshot::default(), Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap())
        .unwrap();

    let error = store.load().unwrap_err();

    assert!(matches!(error, Error::Snapshot(SnapshotError::Empty { .. })));
}

#[test]
fn corrupt_files_are_reported_as_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::in_dir(dir.path());
    std::fs::write(store.data_file(), "{not json").unwrap();

    let error = store.load().unwrap_err();

    assert!(matches!(
        error,
        Error::Snapshot(SnapshotError::Unreadable { .. })
    ));
}

#[test]
fn bad_timestamp_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::in_dir(dir.path());
    std::fs::write(dir.path().join("last_updated.txt"), "yesterday").unwrap();

    assert!(store.last_updated().is_err());
}

#[test]
fn older_snapshots_without_horse_tables_still_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::in_dir(dir.path());
    std::fs::write(
        store.data_file(),
        r#"{
            "total_pnl": [{"user_id": 10111491, "iggt": "3.5"}],
            "reserve_balance": [],
            "in_play_balance": [],
            "races_entered": [],
            "daily_pnl": [],
            "weekly_pnl": []
        }"#,
    )
    .unwrap();

    let snapshot = store.load().unwrap();

    assert_eq!(snapshot.total_pnl[0].iggt, Iggt::new(dec!(3.5)));
    assert!(snapshot.horses.is_empty());
    assert!(snapshot.failures.is_empty());
}
