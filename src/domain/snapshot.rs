//! The full result of one warehouse fetch.
//!
//! A [`Snapshot`] is what `update` persists and what the static dashboard and
//! snapshot-backed reports read back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::horse::{
    DistancePerformance, HorsePerformance, InventoryHorse, RaceMix, StableComposition,
    SurfacePerformance,
};
use super::metric::{BalanceRecord, DailyPnlRecord, RaceCountRecord, WeeklyPnlRecord};

/// Horse-level result sets. Only fetched when requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorseTables {
    pub horse_performance: Vec<HorsePerformance>,
    pub stable_composition: Vec<StableComposition>,
    pub horse_inventory: Vec<InventoryHorse>,
    pub distance_performance: Vec<DistancePerformance>,
    pub surface_performance: Vec<SurfacePerformance>,
    pub distance_mix: Vec<RaceMix>,
    pub grade_mix: Vec<RaceMix>,
    pub track_mix: Vec<RaceMix>,
}

impl HorseTables {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horse_performance.is_empty()
            && self.stable_composition.is_empty()
            && self.horse_inventory.is_empty()
            && self.distance_performance.is_empty()
            && self.surface_performance.is_empty()
            && self.distance_mix.is_empty()
            && self.grade_mix.is_empty()
            && self.track_mix.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub total_pnl: Vec<BalanceRecord>,
    pub reserve_balance: Vec<BalanceRecord>,
    pub in_play_balance: Vec<BalanceRecord>,
    pub races_entered: Vec<RaceCountRecord>,
    pub daily_pnl: Vec<DailyPnlRecord>,
    pub weekly_pnl: Vec<WeeklyPnlRecord>,
    #[serde(default)]
    pub horses: HorseTables,
    /// Query name to error message, for queries that failed during the fetch.
    #[serde(default)]
    pub failures: BTreeMap<String, String>,
}

impl Snapshot {
    /// A snapshot without any total P&L rows carries nothing to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_pnl.is_empty()
    }

    pub fn record_failure(&mut self, query: &str, message: impl Into<String>) {
        self.failures.insert(query.to_string(), message.into());
    }

    #[must_use]
    pub fn failure(&self, query: &str) -> Option<&str> {
        self.failures.get(query).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bot::UserId;
    use crate::domain::money::Iggt;

    #[test]
    fn empty_total_pnl_means_empty_snapshot() {
        let mut snapshot = Snapshot::default();
        assert!(snapshot.is_empty());

        snapshot.total_pnl.push(BalanceRecord {
            user_id: UserId(1),
            iggt: Iggt::from_micros(1),
        });
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn older_files_without_horse_tables_still_parse() {
        let json = r#"{
            "total_pnl": [{"user_id": 10111491, "iggt": "12.5"}],
            "reserve_balance": [],
            "in_play_balance": [],
            "races_entered": [],
            "daily_pnl": [],
            "weekly_pnl": []
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.total_pnl[0].user_id, UserId(10111491));
        assert!(snapshot.horses.is_empty());
        assert!(snapshot.failures.is_empty());
    }

    #[test]
    fn failures_are_keyed_by_query() {
        let mut snapshot = Snapshot::default();
        snapshot.record_failure("in_play_balance", "table missing");
        assert_eq!(snapshot.failure("in_play_balance"), Some("table missing"));
        assert_eq!(snapshot.failure("total_pnl"), None);
    }
}
