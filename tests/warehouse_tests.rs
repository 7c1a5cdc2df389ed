//! Warehouse reader against a seeded SQLite file.

mod harness;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use harness::temp_db::{TempWarehouse, ALBA, EIREAN, THUNDER};
use paddock::adapter::outbound::warehouse::{DatabaseTarget, DieselWarehouse};
use paddock::domain::metric::BalanceRecord;
use paddock::domain::{Iggt, Roster, UserId};
use paddock::port::{FetchRequest, WarehouseReader};

fn warehouse(db: &TempWarehouse) -> DieselWarehouse {
    DieselWarehouse::new(DatabaseTarget::parse(&db.url()).expect("parse sqlite target"))
}

fn request() -> FetchRequest {
    FetchRequest::new(
        Roster::house(),
        NaiveDate::from_ymd_opt(2025, 9, 18).expect("valid date"),
    )
}

fn amount_of(records: &[BalanceRecord], id: i64) -> Option<Iggt> {
    records
        .iter()
        .find(|record| record.user_id == UserId(id))
        .map(|record| record.iggt)
}

#[test]
fn fleet_queries_aggregate_after_the_cutoff() {
    let db = TempWarehouse::seeded();

    let snapshot = warehouse(&db).fetch(&request()).expect("fetch");

    assert!(snapshot.failures.is_empty(), "{:?}", snapshot.failures);
    assert_eq!(amount_of(&snapshot.total_pnl, ALBA), Some(Iggt::new(dec!(4))));
    assert_eq!(amount_of(&snapshot.total_pnl, EIREAN), Some(Iggt::new(dec!(-3))));
    assert_eq!(amount_of(&snapshot.reserve_balance, ALBA), Some(Iggt::new(dec!(10))));
    assert_eq!(amount_of(&snapshot.reserve_balance, EIREAN), Some(Iggt::new(dec!(2.5))));
}

#[test]
fn in_play_counts_only_unsettled_stakes() {
    let db = TempWarehouse::seeded();

    let snapshot = warehouse(&db).fetch(&request()).expect("fetch");

    assert_eq!(amount_of(&snapshot.in_play_balance, ALBA), Some(Iggt::new(dec!(2))));
    assert_eq!(amount_of(&snapshot.in_play_balance, EIREAN), None);
}

#[test]
fn in_play_window_drops_old_stakes() {
    let db = TempWarehouse::seeded();

    let snapshot = warehouse(&db)
        .fetch(&request().with_in_play_window(Some(1)))
        .expect("fetch");

    assert!(snapshot.in_play_balance.is_empty());
}

#[test]
fn daily_pnl_is_bucketed_by_utc_day() {
    let db = TempWarehouse::seeded();

    let snapshot = warehouse(&db).fetch(&request()).expect("fetch");

    let alba: Vec<_> = snapshot
        .daily_pnl
        .iter()
        .filter(|row| row.user_id == UserId(ALBA))
        .map(|row| (row.date.to_string(), row.iggt))
        .collect();
    assert_eq!(
        alba,
        vec![
            ("2025-09-19".to_string(), Iggt::new(dec!(5))),
            ("2025-09-20".to_string(), Iggt::new(dec!(-2))),
        ]
    );

    // Both days fall in ISO week 38.
    let weekly: Vec<_> = snapshot
        .weekly_pnl
        .iter()
        .filter(|row| row.user_id == UserId(ALBA))
        .collect();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0].week, 202538);
    assert_eq!(weekly[0].iggt, Iggt::new(dec!(3)));
}

#[test]
fn races_entered_counts_horse_snapshots() {
    let db = TempWarehouse::seeded();

    let snapshot = warehouse(&db).fetch(&request()).expect("fetch");

    assert_eq!(snapshot.races_entered.len(), 1);
    assert_eq!(snapshot.races_entered[0].user_id, UserId(ALBA));
    assert_eq!(snapshot.races_entered[0].races_entered, 2);
}

#[test]
fn horse_tables_are_fetched_on_request() {
    let db = TempWarehouse::seeded();

    let without = warehouse(&db).fetch(&request()).expect("fetch");
    assert!(without.horses.is_empty());

    let snapshot = warehouse(&db)
        .fetch(&request().with_horses(true))
        .expect("fetch");
    assert!(snapshot.failures.is_empty(), "{:?}", snapshot.failures);

    let horses = &snapshot.horses;
    assert_eq!(horses.horse_performance.len(), 1);
    let thunder = &horses.horse_performance[0];
    assert_eq!(thunder.user_horse_id, THUNDER);
    assert_eq!(thunder.horse_name, "Thunder");
    assert_eq!(thunder.total_races, 2);
    assert_eq!(thunder.wins, 1);
    assert_eq!(thunder.top_3_finishes, 1);
    assert_eq!(thunder.avg_finish_position, Some(2.5));

    // Eirean's only horse is off-chain.
    assert_eq!(horses.stable_composition.len(), 1);
    assert_eq!(horses.stable_composition[0].total_horses, 2);
    assert_eq!(horses.stable_composition[0].active_horses, 1);
    assert_eq!(horses.horse_inventory.len(), 2);

    assert_eq!(horses.distance_performance.len(), 2);
    assert_eq!(horses.surface_performance.len(), 1);
    assert_eq!(horses.surface_performance[0].races, 2);

    assert_eq!(horses.grade_mix.len(), 1);
    assert_eq!(horses.grade_mix[0].bucket, 2);
    assert_eq!(horses.track_mix[0].bucket, 8);
    let distance_share: f64 = horses.distance_mix.iter().map(|mix| mix.pct_of_total).sum();
    assert!((distance_share - 100.0).abs() < 1e-9);
}

#[test]
fn missing_tables_become_failures() {
    let db = TempWarehouse::seeded();
    db.execute("DROP TABLE player_token_account;");

    let snapshot = warehouse(&db).fetch(&request()).expect("fetch");

    assert!(snapshot.reserve_balance.is_empty());
    assert!(snapshot.failure("reserve_balance").is_some());
    assert_eq!(amount_of(&snapshot.total_pnl, ALBA), Some(Iggt::new(dec!(4))));
}

#[test]
fn race_history_lists_newest_event_first() {
    let db = TempWarehouse::seeded();

    let races = warehouse(&db).race_history(THUNDER).expect("race history");

    let events: Vec<i64> = races.iter().map(|race| race.event_id).collect();
    assert_eq!(events, vec![5002, 5001]);
    assert_eq!(races[0].final_position, Some(4));
    assert_eq!(races[0].distance, Some(1600));
    assert_eq!(races[1].track_name.as_deref(), Some("Ascot"));
    assert_eq!(races[1].zone.as_deref(), Some("EU"));
}

#[test]
fn race_history_of_unknown_horse_is_empty() {
    let db = TempWarehouse::seeded();
    assert!(warehouse(&db).race_history(42).expect("race history").is_empty());
}

#[test]
fn probe_counts_every_known_table() {
    let db = TempWarehouse::seeded();
    db.execute("DROP TABLE player_daily_fact_track;");

    let counts = warehouse(&db).probe().expect("probe");

    assert_eq!(counts.len(), 10);
    let rows = |table: &str| {
        counts
            .iter()
            .find(|count| count.table == table)
            .map(|count| count.rows.clone())
            .expect("table probed")
    };
    assert_eq!(rows("player_token_transaction"), Ok(5));
    assert_eq!(rows("full_WC_result"), Ok(2));
    assert!(rows("player_daily_fact_track").is_err());
}

#[test]
fn describe_shows_the_file() {
    let db = TempWarehouse::seeded();
    let described = warehouse(&db).describe();
    assert!(described.contains("warehouse.db"), "{described}");
}
