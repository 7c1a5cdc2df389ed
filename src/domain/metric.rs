//! Per-metric result records.
//!
//! Each record mirrors one row of a warehouse aggregation, keyed by user.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bot::UserId;
use super::money::Iggt;

/// A per-user token amount (total P&L, reserve or in-play balance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub user_id: UserId,
    pub iggt: Iggt,
}

/// Number of races a user has entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceCountRecord {
    pub user_id: UserId,
    pub races_entered: i64,
}

/// Net race P&L for one user on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPnlRecord {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub iggt: Iggt,
}

/// Net race P&L for one user in one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPnlRecord {
    pub user_id: UserId,
    /// ISO year and week as `YYYYWW`, e.g. `202538`.
    pub week: u32,
    pub iggt: Iggt,
}

/// The `YYYYWW` key of the Monday-started ISO week containing `date`.
#[must_use]
pub fn year_week(date: NaiveDate) -> u32 {
    let week = date.iso_week();
    // ISO years handled here are always positive.
    (week.year().unsigned_abs() * 100) + week.week()
}

/// Fold daily rows into weekly rows, ordered by user then week.
#[must_use]
pub fn weekly_rollup(daily: &[DailyPnlRecord]) -> Vec<WeeklyPnlRecord> {
    let mut weeks: BTreeMap<(UserId, u32), Iggt> = BTreeMap::new();
    for row in daily {
        *weeks.entry((row.user_id, year_week(row.date))).or_default() += row.iggt;
    }

    weeks
        .into_iter()
        .map(|((user_id, week), iggt)| WeeklyPnlRecord {
            user_id,
            week,
            iggt,
        })
        .collect()
}

/// Look up the amount for a user in a balance set.
#[must_use]
pub fn amount_for(records: &[BalanceRecord], user_id: UserId) -> Option<Iggt> {
    records
        .iter()
        .find(|record| record.user_id == user_id)
        .map(|record| record.iggt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(user: i64, date: NaiveDate, amount: rust_decimal::Decimal) -> DailyPnlRecord {
        DailyPnlRecord {
            user_id: UserId(user),
            date,
            iggt: Iggt::new(amount),
        }
    }

    #[test]
    fn year_week_uses_monday_started_iso_weeks() {
        // 2025-09-18 is a Thursday in ISO week 38.
        assert_eq!(year_week(day(2025, 9, 18)), 202538);
        // Sunday still belongs to the week that started on Monday.
        assert_eq!(year_week(day(2025, 9, 21)), 202538);
        assert_eq!(year_week(day(2025, 9, 22)), 202539);
    }

    #[test]
    fn year_week_assigns_early_january_to_previous_iso_year() {
        // 2021-01-03 is a Sunday belonging to 2020-W53.
        assert_eq!(year_week(day(2021, 1, 3)), 202053);
    }

    #[test]
    fn weekly_rollup_sums_days_per_user_and_week() {
        let rows = vec![
            daily(2, day(2025, 9, 18), dec!(10)),
            daily(1, day(2025, 9, 19), dec!(-4)),
            daily(1, day(2025, 9, 18), dec!(6)),
            daily(1, day(2025, 9, 22), dec!(1.5)),
        ];

        let weekly = weekly_rollup(&rows);

        assert_eq!(weekly.len(), 3);
        assert_eq!(weekly[0].user_id, UserId(1));
        assert_eq!(weekly[0].week, 202538);
        assert_eq!(weekly[0].iggt.value(), dec!(2));
        assert_eq!(weekly[1].week, 202539);
        assert_eq!(weekly[1].iggt.value(), dec!(1.5));
        assert_eq!(weekly[2].user_id, UserId(2));
        assert_eq!(weekly[2].iggt.value(), dec!(10));
    }

    #[test]
    fn weekly_rollup_of_nothing_is_empty() {
        assert!(weekly_rollup(&[]).is_empty());
    }

    #[test]
    fn amount_for_finds_matching_user() {
        let records = vec![BalanceRecord {
            user_id: UserId(5),
            iggt: Iggt::new(dec!(7)),
        }];
        assert_eq!(amount_for(&records, UserId(5)), Some(Iggt::new(dec!(7))));
        assert_eq!(amount_for(&records, UserId(6)), None);
    }
}
