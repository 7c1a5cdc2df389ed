//! Diesel-backed [`WarehouseReader`].

use chrono::Utc;
use tracing::{info, warn};

use super::connection::{AnyConnection, WarehouseConnection, WarehouseRow};
use super::query::{race_history_sql, row_count_sql, QueryContext, KNOWN_TABLES};
use super::row::{
    AmountRow, DailyRow, DistancePerformanceRow, HorsePerformanceRow, IntoRecord, InventoryRow,
    MixRow, RaceCountRow, RaceEntryRow, RowCount, StableCompositionRow, SurfacePerformanceRow,
};
use super::target::DatabaseTarget;
use crate::domain::horse::{RaceEntry, RaceMix};
use crate::domain::metric::weekly_rollup;
use crate::domain::{HorseTables, Snapshot};
use crate::error::{Result, WarehouseError};
use crate::port::outbound::warehouse::{FetchRequest, QueryName, TableCount, WarehouseReader};

/// Run one query, recording a failure in the snapshot instead of returning it.
fn run<C, R>(
    conn: &mut C,
    snapshot: &mut Snapshot,
    ctx: &QueryContext,
    query: QueryName,
) -> Vec<R::Record>
where
    C: WarehouseConnection,
    R: WarehouseRow + IntoRecord,
{
    let sql = ctx.sql(query);
    let result = conn
        .load_rows::<R>(&sql)
        .map_err(|e| e.to_string())
        .and_then(|rows| {
            rows.into_iter()
                .map(IntoRecord::into_record)
                .collect::<std::result::Result<Vec<_>, _>>()
        });

    match result {
        Ok(records) => {
            info!(query = query.name(), rows = records.len(), "query complete");
            records
        }
        Err(message) => {
            warn!(query = query.name(), error = %message, "query failed");
            snapshot.record_failure(query.name(), message);
            Vec::new()
        }
    }
}

/// Run every query the request names against an open connection.
///
/// Each failed query leaves an empty set behind and an entry in
/// [`Snapshot::failures`].
pub fn collect_snapshot<C: WarehouseConnection>(conn: &mut C, request: &FetchRequest) -> Snapshot {
    let in_play_since = request
        .in_play_window_hours
        .map(|hours| Utc::now().timestamp() - i64::from(hours) * 3600);
    let ctx = QueryContext::new(conn.dialect(), &request.roster, request.cutoff())
        .with_in_play_since(in_play_since);

    let mut snapshot = Snapshot::default();
    snapshot.total_pnl = run::<C, AmountRow>(conn, &mut snapshot, &ctx, QueryName::TotalPnl);
    snapshot.in_play_balance =
        run::<C, AmountRow>(conn, &mut snapshot, &ctx, QueryName::InPlayBalance);
    snapshot.reserve_balance =
        run::<C, AmountRow>(conn, &mut snapshot, &ctx, QueryName::ReserveBalance);
    snapshot.races_entered =
        run::<C, RaceCountRow>(conn, &mut snapshot, &ctx, QueryName::RacesEntered);
    snapshot.daily_pnl = run::<C, DailyRow>(conn, &mut snapshot, &ctx, QueryName::DailyPnl);

    match snapshot.failure(QueryName::DailyPnl.name()).map(str::to_string) {
        Some(message) => snapshot.record_failure(QueryName::WeeklyPnl.name(), message),
        None => snapshot.weekly_pnl = weekly_rollup(&snapshot.daily_pnl),
    }

    if request.include_horses {
        let mut horses = HorseTables::default();
        horses.horse_performance =
            run::<C, HorsePerformanceRow>(conn, &mut snapshot, &ctx, QueryName::HorsePerformance);
        horses.stable_composition =
            run::<C, StableCompositionRow>(conn, &mut snapshot, &ctx, QueryName::StableComposition);
        horses.horse_inventory =
            run::<C, InventoryRow>(conn, &mut snapshot, &ctx, QueryName::HorseInventory);
        horses.distance_performance = run::<C, DistancePerformanceRow>(
            conn,
            &mut snapshot,
            &ctx,
            QueryName::DistancePerformance,
        );
        horses.surface_performance = run::<C, SurfacePerformanceRow>(
            conn,
            &mut snapshot,
            &ctx,
            QueryName::SurfacePerformance,
        );
        horses.distance_mix =
            RaceMix::with_shares(run::<C, MixRow>(conn, &mut snapshot, &ctx, QueryName::DistanceMix));
        horses.grade_mix =
            RaceMix::with_shares(run::<C, MixRow>(conn, &mut snapshot, &ctx, QueryName::GradeMix));
        horses.track_mix =
            RaceMix::with_shares(run::<C, MixRow>(conn, &mut snapshot, &ctx, QueryName::TrackMix));
        snapshot.horses = horses;
    }

    if !snapshot.failures.is_empty() {
        warn!(failed = snapshot.failures.len(), "some queries failed");
    }
    snapshot
}

/// Warehouse reader that opens a fresh connection per call.
#[derive(Debug, Clone)]
pub struct DieselWarehouse {
    target: DatabaseTarget,
}

impl DieselWarehouse {
    #[must_use]
    pub fn new(target: DatabaseTarget) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> &DatabaseTarget {
        &self.target
    }

    fn connect(&self) -> Result<AnyConnection> {
        AnyConnection::establish(&self.target)
    }
}

impl WarehouseReader for DieselWarehouse {
    fn fetch(&self, request: &FetchRequest) -> Result<Snapshot> {
        let mut conn = self.connect()?;
        info!(
            database = %self.target,
            bots = request.roster.len(),
            since = %request.since,
            "fetching bot data"
        );
        Ok(collect_snapshot(&mut conn, request))
    }

    fn race_history(&self, user_horse_id: i64) -> Result<Vec<RaceEntry>> {
        let mut conn = self.connect()?;
        let sql = race_history_sql(conn.dialect(), user_horse_id);
        let rows: Vec<RaceEntryRow> = conn.load_rows(&sql).map_err(|e| WarehouseError::Query {
            query: "race_history",
            message: e.to_string(),
        })?;
        let entries = rows
            .into_iter()
            .map(IntoRecord::into_record)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|reason| WarehouseError::Decode {
                query: "race_history",
                reason,
            })?;
        info!(user_horse_id, rows = entries.len(), "loaded race history");
        Ok(entries)
    }

    fn probe(&self) -> Result<Vec<TableCount>> {
        let mut conn = self.connect()?;
        let dialect = conn.dialect();
        let counts = KNOWN_TABLES
            .iter()
            .map(|&table| {
                let rows = conn
                    .load_rows::<RowCount>(&row_count_sql(dialect, table))
                    .map_err(|e| e.to_string())
                    .map(|rows| rows.first().map_or(0, |row| row.row_count));
                TableCount { table, rows }
            })
            .collect();
        Ok(counts)
    }

    fn describe(&self) -> String {
        self.target.redacted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Roster;
    use chrono::NaiveDate;
    use diesel::{Connection, SqliteConnection};

    fn request() -> FetchRequest {
        FetchRequest::new(Roster::house(), NaiveDate::from_ymd_opt(2025, 9, 18).unwrap())
    }

    #[test]
    fn missing_tables_are_recorded_not_returned() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();

        let snapshot = collect_snapshot(&mut conn, &request());

        assert!(snapshot.total_pnl.is_empty());
        for name in [
            "total_pnl",
            "in_play_balance",
            "reserve_balance",
            "races_entered",
            "daily_pnl",
            "weekly_pnl",
        ] {
            assert!(snapshot.failure(name).is_some(), "{name} should have failed");
        }
        assert!(snapshot.failure("horse_performance").is_none());
    }

    #[test]
    fn horse_queries_run_only_when_requested() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();

        let snapshot = collect_snapshot(&mut conn, &request().with_horses(true));

        assert!(snapshot.failure("horse_performance").is_some());
        assert!(snapshot.failure("track_mix").is_some());
    }
}
