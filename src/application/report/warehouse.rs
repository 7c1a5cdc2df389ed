//! The raw query report: every dataset as fetched, one block per query.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use tabled::Tabled;

use super::{opt_float, opt_int, rule, table, TIMESTAMP_FORMAT};
use crate::domain::horse::{Distance, Grade, RaceMix, Surface};
use crate::domain::metric::BalanceRecord;
use crate::domain::{Roster, Snapshot};
use crate::port::outbound::warehouse::QueryName;

/// Where the data came from. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub database: String,
    pub host: String,
    pub target_users: String,
}

impl ReportHeader {
    #[must_use]
    pub fn new(database: impl Into<String>, host: impl Into<String>, roster: &Roster) -> Self {
        Self {
            database: database.into(),
            host: host.into(),
            target_users: roster.sql_id_list(),
        }
    }
}

#[derive(Tabled)]
struct AmountRow {
    user_id: String,
    #[tabled(rename = "IGGT")]
    iggt: String,
}

#[derive(Tabled)]
struct RaceCountRow {
    user_id: String,
    races_entered: i64,
}

#[derive(Tabled)]
struct PeriodRow {
    user_id: String,
    report_type: &'static str,
    report_group: String,
    net_profit_loss_iggt: String,
}

#[derive(Tabled)]
struct HorsePerformanceRow {
    user_id: String,
    user_horse_id: i64,
    horse_name: String,
    total_races: i64,
    avg_finish_position: String,
    wins: i64,
    top_3_finishes: i64,
    career_earnings_iggt: String,
}

#[derive(Tabled)]
struct StableCompositionRow {
    user_id: String,
    total_horses: i64,
    grade_1_horses: i64,
    grade_2_horses: i64,
    grade_3_horses: i64,
    active_horses: i64,
    avg_generation: String,
}

#[derive(Tabled)]
struct InventoryRow {
    user_id: String,
    horse_id: i64,
    horse_name: String,
    grade: String,
    generation: String,
    status: String,
}

#[derive(Tabled)]
struct DistancePerformanceRow {
    user_id: String,
    horse_name: String,
    distance: String,
    races: i64,
    avg_position: String,
    best_position: String,
    wins: i64,
    top_3_finishes: i64,
}

#[derive(Tabled)]
struct SurfacePerformanceRow {
    user_id: String,
    horse_name: String,
    surface: String,
    races: i64,
    avg_position: String,
    best_position: String,
    wins: i64,
    top_3_finishes: i64,
}

#[derive(Tabled)]
struct MixRow {
    user_id: String,
    bucket: String,
    total_races: i64,
    pct_of_total: String,
}

/// The dataset behind `query` as a table, or `None` when it has no rows.
fn dataset_table(snapshot: &Snapshot, query: QueryName) -> Option<String> {
    let amounts = |records: &[BalanceRecord]| {
        (!records.is_empty()).then(|| {
            table(records.iter().map(|r| AmountRow {
                user_id: r.user_id.to_string(),
                iggt: r.iggt.to_string(),
            }))
        })
    };
    let mixes = |rows: &[RaceMix], label: fn(i64) -> String| {
        (!rows.is_empty()).then(|| {
            table(rows.iter().map(|r| MixRow {
                user_id: r.user_id.to_string(),
                bucket: label(r.bucket),
                total_races: r.total_races,
                pct_of_total: format!("{:.2}", r.pct_of_total),
            }))
        })
    };
    let horses = &snapshot.horses;

    match query {
        QueryName::TotalPnl => amounts(&snapshot.total_pnl),
        QueryName::InPlayBalance => amounts(&snapshot.in_play_balance),
        QueryName::ReserveBalance => amounts(&snapshot.reserve_balance),
        QueryName::RacesEntered => (!snapshot.races_entered.is_empty()).then(|| {
            table(snapshot.races_entered.iter().map(|r| RaceCountRow {
                user_id: r.user_id.to_string(),
                races_entered: r.races_entered,
            }))
        }),
        QueryName::DailyPnl => (!snapshot.daily_pnl.is_empty()).then(|| {
            table(snapshot.daily_pnl.iter().map(|r| PeriodRow {
                user_id: r.user_id.to_string(),
                report_type: "DAILY",
                report_group: r.date.to_string(),
                net_profit_loss_iggt: r.iggt.to_string(),
            }))
        }),
        QueryName::WeeklyPnl => (!snapshot.weekly_pnl.is_empty()).then(|| {
            table(snapshot.weekly_pnl.iter().map(|r| PeriodRow {
                user_id: r.user_id.to_string(),
                report_type: "WEEKLY",
                report_group: r.week.to_string(),
                net_profit_loss_iggt: r.iggt.to_string(),
            }))
        }),
        QueryName::HorsePerformance => (!horses.horse_performance.is_empty()).then(|| {
            table(horses.horse_performance.iter().map(|h| HorsePerformanceRow {
                user_id: h.user_id.to_string(),
                user_horse_id: h.user_horse_id,
                horse_name: h.horse_name.clone(),
                total_races: h.total_races,
                avg_finish_position: opt_float(h.avg_finish_position, 2),
                wins: h.wins,
                top_3_finishes: h.top_3_finishes,
                career_earnings_iggt: h.career_earnings.to_string(),
            }))
        }),
        QueryName::StableComposition => (!horses.stable_composition.is_empty()).then(|| {
            table(horses.stable_composition.iter().map(|s| StableCompositionRow {
                user_id: s.user_id.to_string(),
                total_horses: s.total_horses,
                grade_1_horses: s.grade_1_horses,
                grade_2_horses: s.grade_2_horses,
                grade_3_horses: s.grade_3_horses,
                active_horses: s.active_horses,
                avg_generation: opt_float(s.avg_generation, 2),
            }))
        }),
        QueryName::HorseInventory => (!horses.horse_inventory.is_empty()).then(|| {
            table(horses.horse_inventory.iter().map(|h| InventoryRow {
                user_id: h.user_id.to_string(),
                horse_id: h.horse_id,
                horse_name: h.horse_name.clone(),
                grade: opt_int(h.grade),
                generation: opt_int(h.generation),
                status: opt_int(h.status),
            }))
        }),
        QueryName::DistancePerformance => (!horses.distance_performance.is_empty()).then(|| {
            table(horses.distance_performance.iter().map(|d| DistancePerformanceRow {
                user_id: d.user_id.to_string(),
                horse_name: d.horse_name.clone(),
                distance: Distance::from_code(d.distance).to_string(),
                races: d.races,
                avg_position: opt_float(d.avg_position, 2),
                best_position: opt_int(d.best_position),
                wins: d.wins,
                top_3_finishes: d.top_3_finishes,
            }))
        }),
        QueryName::SurfacePerformance => (!horses.surface_performance.is_empty()).then(|| {
            table(horses.surface_performance.iter().map(|s| SurfacePerformanceRow {
                user_id: s.user_id.to_string(),
                horse_name: s.horse_name.clone(),
                surface: Surface::from_code(s.surface).to_string(),
                races: s.races,
                avg_position: opt_float(s.avg_position, 2),
                best_position: opt_int(s.best_position),
                wins: s.wins,
                top_3_finishes: s.top_3_finishes,
            }))
        }),
        QueryName::DistanceMix => mixes(&horses.distance_mix, |code| {
            Distance::from_code(Some(code)).to_string()
        }),
        QueryName::GradeMix => mixes(&horses.grade_mix, |code| {
            Grade::from_code(Some(code)).to_string()
        }),
        QueryName::TrackMix => mixes(&horses.track_mix, |code| format!("Track {code}")),
    }
}

/// Render the raw report for the given queries.
#[must_use]
pub fn warehouse_report(
    snapshot: &Snapshot,
    header: &ReportHeader,
    queries: &[QueryName],
    generated_at: NaiveDateTime,
) -> String {
    let mut out = String::new();
    writeln!(out, "{}", rule('=', 80)).ok();
    writeln!(
        out,
        "Analytics Data Warehouse Report - Generated: {}",
        generated_at.format(TIMESTAMP_FORMAT)
    ).ok();
    writeln!(out, "Database: {} on {}", header.database, header.host).ok();
    writeln!(out, "Target Users: {}", header.target_users).ok();
    write!(out, "{}", rule('=', 80)).ok();

    for &query in queries {
        write!(out, "\n\n\n--- REPORT: {} ---\n", query.title()).ok();
        let body = match snapshot.failure(query.name()) {
            Some(message) => format!("   !! ERROR EXECUTING QUERY '{}': {message}", query.name()),
            None => dataset_table(snapshot, query)
                .unwrap_or_else(|| "No results found for this query.".to_string()),
        };
        write!(out, "{body}").ok();
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metric::DailyPnlRecord;
    use crate::domain::{Iggt, UserId};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn header() -> ReportHeader {
        ReportHeader::new("analytics", "db.internal", &Roster::house())
    }

    #[test]
    fn banner_names_database_and_users() {
        let report = warehouse_report(&Snapshot::default(), &header(), &QueryName::FLEET, at());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=".repeat(80));
        assert_eq!(
            lines[1],
            "Analytics Data Warehouse Report - Generated: 2025-10-02 12:00:00"
        );
        assert_eq!(lines[2], "Database: analytics on db.internal");
        assert!(lines[3].starts_with("Target Users: 10111491, 10211493"));
    }

    #[test]
    fn empty_and_failed_queries_are_labelled() {
        let mut snapshot = Snapshot::default();
        snapshot.record_failure("daily_pnl", "no such table: player_token_transaction");

        let report = warehouse_report(&snapshot, &header(), &QueryName::FLEET, at());

        assert!(report.contains("--- REPORT: TOTAL NET PNL ---\nNo results found for this query."));
        assert!(report.contains(
            "   !! ERROR EXECUTING QUERY 'daily_pnl': no such table: player_token_transaction"
        ));
        assert_eq!(report.matches("--- REPORT:").count(), 6);
    }

    #[test]
    fn populated_queries_render_tables() {
        let snapshot = Snapshot {
            total_pnl: vec![BalanceRecord {
                user_id: UserId(10111491),
                iggt: Iggt::new(dec!(1234.5)),
            }],
            daily_pnl: vec![DailyPnlRecord {
                user_id: UserId(10111491),
                date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
                iggt: Iggt::new(dec!(-3)),
            }],
            ..Snapshot::default()
        };

        let report = warehouse_report(
            &snapshot,
            &header(),
            &[QueryName::TotalPnl, QueryName::DailyPnl],
            at(),
        );

        assert!(report.contains("1,234.50"));
        assert!(report.contains("DAILY"));
        assert!(report.contains("2025-09-20"));
        assert!(report.contains("-3.00"));
    }
}
