//! Read-side warehouse query port.

use std::fmt;

use chrono::NaiveDate;

use crate::domain::horse::RaceEntry;
use crate::domain::{Roster, Snapshot};
use crate::error::Result;

/// Parameters of one warehouse fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub roster: Roster,
    /// P&L is counted from UTC midnight of this date.
    pub since: NaiveDate,
    /// Only count stakes placed within this many hours as in play.
    pub in_play_window_hours: Option<u32>,
    pub include_horses: bool,
}

impl FetchRequest {
    #[must_use]
    pub fn new(roster: Roster, since: NaiveDate) -> Self {
        Self {
            roster,
            since,
            in_play_window_hours: None,
            include_horses: false,
        }
    }

    #[must_use]
    pub fn with_in_play_window(mut self, hours: Option<u32>) -> Self {
        self.in_play_window_hours = hours;
        self
    }

    #[must_use]
    pub fn with_horses(mut self, include: bool) -> Self {
        self.include_horses = include;
        self
    }

    /// Unix timestamp of the cutoff.
    #[must_use]
    pub fn cutoff(&self) -> i64 {
        self.since
            .and_hms_opt(0, 0, 0)
            .map_or(0, |midnight| midnight.and_utc().timestamp())
    }
}

/// One dataset of a fetch. Its `name()` keys [`Snapshot::failures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryName {
    TotalPnl,
    InPlayBalance,
    ReserveBalance,
    RacesEntered,
    DailyPnl,
    WeeklyPnl,
    HorsePerformance,
    StableComposition,
    HorseInventory,
    DistancePerformance,
    SurfacePerformance,
    DistanceMix,
    GradeMix,
    TrackMix,
}

impl QueryName {
    /// The fleet-level queries, in report order.
    pub const FLEET: [QueryName; 6] = [
        Self::TotalPnl,
        Self::InPlayBalance,
        Self::ReserveBalance,
        Self::RacesEntered,
        Self::DailyPnl,
        Self::WeeklyPnl,
    ];

    pub const HORSE: [QueryName; 8] = [
        Self::HorsePerformance,
        Self::StableComposition,
        Self::HorseInventory,
        Self::DistancePerformance,
        Self::SurfacePerformance,
        Self::DistanceMix,
        Self::GradeMix,
        Self::TrackMix,
    ];

    /// Snake-case key used in logs and the snapshot failure map.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TotalPnl => "total_pnl",
            Self::InPlayBalance => "in_play_balance",
            Self::ReserveBalance => "reserve_balance",
            Self::RacesEntered => "races_entered",
            Self::DailyPnl => "daily_pnl",
            Self::WeeklyPnl => "weekly_pnl",
            Self::HorsePerformance => "horse_performance",
            Self::StableComposition => "stable_composition",
            Self::HorseInventory => "horse_inventory",
            Self::DistancePerformance => "distance_performance",
            Self::SurfacePerformance => "surface_performance",
            Self::DistanceMix => "distance_mix",
            Self::GradeMix => "grade_mix",
            Self::TrackMix => "track_mix",
        }
    }

    /// Heading used in the raw query report.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::TotalPnl => "TOTAL NET PNL",
            Self::InPlayBalance => "IN PLAY BALANCE",
            Self::ReserveBalance => "RESERVE BALANCE",
            Self::RacesEntered => "RACES ENTERED",
            Self::DailyPnl => "DAILY NET PNL",
            Self::WeeklyPnl => "WEEKLY NET PNL",
            Self::HorsePerformance => "HORSE PERFORMANCE",
            Self::StableComposition => "STABLE COMPOSITION",
            Self::HorseInventory => "HORSE INVENTORY",
            Self::DistancePerformance => "DISTANCE PERFORMANCE",
            Self::SurfacePerformance => "SURFACE PERFORMANCE",
            Self::DistanceMix => "DISTANCE MIX",
            Self::GradeMix => "GRADE MIX",
            Self::TrackMix => "TRACK MIX",
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row count of one warehouse table, or the error reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: std::result::Result<i64, String>,
}

/// Read-side warehouse contract.
pub trait WarehouseReader {
    /// Run every query named by the request.
    ///
    /// Individual query failures are recorded in [`Snapshot::failures`]; only
    /// a connection failure is returned as an error.
    fn fetch(&self, request: &FetchRequest) -> Result<Snapshot>;

    /// All races of one horse, newest first.
    fn race_history(&self, user_horse_id: i64) -> Result<Vec<RaceEntry>>;

    /// Row counts of the tables the reports read.
    fn probe(&self) -> Result<Vec<TableCount>>;

    /// Connection description safe for display.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_utc_midnight() {
        let since = NaiveDate::from_ymd_opt(2025, 9, 18).unwrap();
        let request = FetchRequest::new(Roster::house(), since);
        assert_eq!(request.cutoff(), 1_758_153_600);
    }

    #[test]
    fn builders_set_optional_parts() {
        let since = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let request = FetchRequest::new(Roster::house(), since)
            .with_in_play_window(Some(24))
            .with_horses(true);
        assert_eq!(request.in_play_window_hours, Some(24));
        assert!(request.include_horses);
    }
}
