use std::path::{Path, PathBuf};

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use tempfile::TempDir;

/// Unix seconds of 2025-09-19 00:00:00 UTC, the day after the default cutoff.
pub const DAY_ONE: i64 = 1_758_240_000;
/// Unix seconds of 2025-09-20 00:00:00 UTC.
pub const DAY_TWO: i64 = DAY_ONE + 86_400;
/// Before 2025-09-18, so excluded from every P&L aggregate.
pub const BEFORE_CUTOFF: i64 = 1_700_000_000;

pub const ALBA: i64 = 10_111_491;
pub const EIREAN: i64 = 10_211_493;
pub const THUNDER: i64 = 274_848_022_531;

const SCHEMA: &str = "
CREATE TABLE player_token_transaction (
    user_id INTEGER NOT NULL,
    amount INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    ctx_type INTEGER NOT NULL,
    source_trx_id INTEGER
);
CREATE TABLE player_token_account (user_id INTEGER NOT NULL, amount INTEGER NOT NULL);
CREATE TABLE full_WC_result (event_id INTEGER NOT NULL);
CREATE TABLE full_WC_horse_snapshot (
    _id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    user_horse_id INTEGER NOT NULL,
    name TEXT,
    generation INTEGER,
    grade INTEGER,
    gender INTEGER,
    age INTEGER,
    trainer_id INTEGER,
    final_position INTEGER,
    rating REAL,
    speed REAL,
    stamina REAL,
    acceleration REAL,
    career_earnings INTEGER,
    Zone TEXT
);
CREATE TABLE full_WC_entrant (
    horse_snapshot_id INTEGER NOT NULL,
    Zone TEXT,
    event_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    user_horse_id INTEGER NOT NULL,
    final_position INTEGER,
    stall INTEGER
);
CREATE TABLE full_WC_event (
    _id INTEGER NOT NULL,
    Zone TEXT,
    distance INTEGER,
    surface INTEGER,
    weather INTEGER,
    `condition` INTEGER,
    track_name TEXT
);
CREATE TABLE player_horse (
    _id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    name TEXT,
    grade INTEGER,
    bloodline INTEGER,
    gen INTEGER,
    gender INTEGER,
    age INTEGER,
    trainer_id INTEGER,
    status INTEGER,
    horse_type_id INTEGER,
    modified_utc TEXT,
    oc_shard INTEGER
);
CREATE TABLE player_daily_fact_distance (user_id INTEGER, distance INTEGER, `count` INTEGER);
CREATE TABLE player_daily_fact_grade (user_id INTEGER, grade INTEGER, `count` INTEGER);
CREATE TABLE player_daily_fact_track (user_id INTEGER, track_id INTEGER, `count` INTEGER);
";

/// Temporary SQLite warehouse with the analytics schema.
pub struct TempWarehouse {
    dir: TempDir,
    path: PathBuf,
}

impl TempWarehouse {
    /// Empty tables only.
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("warehouse.db");
        let warehouse = Self { dir, path };
        warehouse.execute(SCHEMA);
        warehouse
    }

    /// Tables holding a small, known activity set for Alba and Eirean.
    ///
    /// - Alba: +5 and -2 IGGT race results, +1 IGGT reward, 2 IGGT still in
    ///   play, one horse with two races.
    /// - Eirean: one settled -3 IGGT race.
    /// - The other house bots have no rows.
    pub fn seeded() -> Self {
        let warehouse = Self::create();
        warehouse.execute(&format!(
            "
            INSERT INTO player_token_transaction VALUES
                ({ALBA}, 5000000, {DAY_ONE}, 1, 900),
                ({ALBA}, -2000000, {DAY_TWO}, 1, 901),
                ({ALBA}, 1000000, {DAY_ONE}, 2, NULL),
                ({ALBA}, 100000000, {BEFORE_CUTOFF}, 1, 800),
                ({EIREAN}, -3000000, {DAY_ONE}, 1, 902);
            INSERT INTO player_token_account VALUES
                ({ALBA}, 10000000),
                ({EIREAN}, 2500000);
            INSERT INTO full_WC_result VALUES (900), (902);
            INSERT INTO full_WC_horse_snapshot VALUES
                (1, {ALBA}, {THUNDER}, 'Thunder', 3, 2, 1, 4, 77, 1, 80.0, 90.0, 70.0, 60.0, 5000000, 'EU'),
                (2, {ALBA}, {THUNDER}, 'Thunder', 3, 2, 1, 4, 77, 4, 70.0, 88.0, 72.0, 62.0, 5000000, 'EU');
            INSERT INTO full_WC_entrant VALUES
                (1, 'EU', 5001, {ALBA}, {THUNDER}, 1, 3),
                (2, 'EU', 5002, {ALBA}, {THUNDER}, 4, 7);
            INSERT INTO full_WC_event VALUES
                (5001, 'EU', 1200, 1, 2, 1, 'Ascot'),
                (5002, 'EU', 1600, 1, 2, 1, 'York');
            INSERT INTO player_horse VALUES
                (11, {ALBA}, 'Thunder', 2, 1, 3, 1, 4, 77, 0, 1, '2025-09-19 10:00:00', 1),
                (12, {ALBA}, 'Drizzle', 3, 2, 5, 2, 3, 78, 1, 1, '2025-09-20 10:00:00', 1),
                (13, {EIREAN}, 'Ghost', 1, 1, 1, 1, 2, 79, 0, 1, '2025-09-20 10:00:00', 0);
            INSERT INTO player_daily_fact_distance VALUES ({ALBA}, 1200, 3), ({ALBA}, 1600, 1);
            INSERT INTO player_daily_fact_grade VALUES ({ALBA}, 2, 4), ({ALBA}, 0, 9);
            INSERT INTO player_daily_fact_track VALUES ({ALBA}, 7, 1), ({ALBA}, 8, 3);
            "
        ));
        warehouse
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value for `DATABASE_URL`.
    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn execute(&self, sql: &str) {
        let mut conn = SqliteConnection::establish(&self.path.display().to_string())
            .expect("open sqlite warehouse");
        conn.batch_execute(sql).expect("run fixture sql");
    }
}
