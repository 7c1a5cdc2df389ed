//! The per-bot overview table, built by joining the metric sets on user id.

use serde::Serialize;

use super::bot::{Bot, Roster, UserId};
use super::metric::amount_for;
use super::money::Iggt;
use super::rating::{PerformanceRating, RatingThresholds};
use super::snapshot::Snapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    pub bot: Bot,
    pub total_pnl: Iggt,
    pub reserve_balance: Iggt,
    pub in_play_balance: Iggt,
    pub races_entered: i64,
    pub pnl_per_race: Iggt,
    pub rating: PerformanceRating,
}

impl OverviewRow {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.bot.name
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.bot.id
    }
}

/// Which bots get a row in the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeScope {
    /// Every roster bot, then any extra id with P&L rows.
    #[default]
    Roster,
    /// Only users present in the total P&L set, in that set's order.
    PnlRows,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Overview {
    rows: Vec<OverviewRow>,
}

impl Overview {
    /// Join every metric set onto the roster.
    ///
    /// Rows follow roster order. Ids that appear in the total P&L set but not in
    /// the roster are appended afterwards. Missing metrics count as zero.
    #[must_use]
    pub fn merge(roster: &Roster, snapshot: &Snapshot, thresholds: &RatingThresholds) -> Self {
        Self::merge_scoped(MergeScope::Roster, roster, snapshot, thresholds)
    }

    /// Join the metric sets onto the bots selected by `scope`.
    ///
    /// With [`MergeScope::PnlRows`] a bot without total P&L rows is left out,
    /// so fleet counts and averages cover active bots only.
    #[must_use]
    pub fn merge_scoped(
        scope: MergeScope,
        roster: &Roster,
        snapshot: &Snapshot,
        thresholds: &RatingThresholds,
    ) -> Self {
        let mut bots: Vec<Bot> = match scope {
            MergeScope::Roster => roster.bots().to_vec(),
            MergeScope::PnlRows => Vec::new(),
        };
        for record in &snapshot.total_pnl {
            if !bots.iter().any(|bot| bot.id == record.user_id) {
                bots.push(Bot {
                    id: record.user_id,
                    name: roster.name_of(record.user_id),
                });
            }
        }

        let rows = bots
            .into_iter()
            .map(|bot| {
                let total_pnl = amount_for(&snapshot.total_pnl, bot.id).unwrap_or_default();
                let reserve_balance =
                    amount_for(&snapshot.reserve_balance, bot.id).unwrap_or_default();
                let in_play_balance =
                    amount_for(&snapshot.in_play_balance, bot.id).unwrap_or_default();
                let races_entered = snapshot
                    .races_entered
                    .iter()
                    .find(|record| record.user_id == bot.id)
                    .map_or(0, |record| record.races_entered);

                OverviewRow {
                    pnl_per_race: total_pnl.per(races_entered),
                    rating: PerformanceRating::classify(total_pnl, thresholds),
                    bot,
                    total_pnl,
                    reserve_balance,
                    in_play_balance,
                    races_entered,
                }
            })
            .collect();

        Self { rows }
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<OverviewRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[OverviewRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ordered by total P&L, highest first. Ties keep table order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&OverviewRow> {
        let mut ranked: Vec<&OverviewRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metric::{BalanceRecord, RaceCountRecord};
    use rust_decimal_macros::dec;

    fn balance(user: i64, amount: rust_decimal::Decimal) -> BalanceRecord {
        BalanceRecord {
            user_id: UserId(user),
            iggt: Iggt::new(amount),
        }
    }

    fn roster() -> Roster {
        Roster::new(vec![Bot::new(1, "Alba"), Bot::new(2, "Eirean")])
    }

    #[test]
    fn merge_fills_missing_metrics_with_zero() {
        let snapshot = Snapshot {
            total_pnl: vec![balance(1, dec!(3500))],
            reserve_balance: vec![balance(2, dec!(40))],
            races_entered: vec![RaceCountRecord {
                user_id: UserId(1),
                races_entered: 7,
            }],
            ..Snapshot::default()
        };

        let overview = Overview::merge(&roster(), &snapshot, &RatingThresholds::default());

        assert_eq!(overview.len(), 2);
        let alba = &overview.rows()[0];
        assert_eq!(alba.name(), "Alba");
        assert_eq!(alba.total_pnl.value(), dec!(3500));
        assert_eq!(alba.pnl_per_race.value(), dec!(500));
        assert_eq!(alba.reserve_balance, Iggt::ZERO);
        assert_eq!(alba.rating, PerformanceRating::Excellent);

        let eirean = &overview.rows()[1];
        assert_eq!(eirean.total_pnl, Iggt::ZERO);
        assert_eq!(eirean.reserve_balance.value(), dec!(40));
        assert_eq!(eirean.races_entered, 0);
        assert_eq!(eirean.pnl_per_race, Iggt::ZERO);
        assert_eq!(eirean.rating, PerformanceRating::NeedsAttention);
    }

    #[test]
    fn merge_appends_unknown_ids_after_roster() {
        let snapshot = Snapshot {
            total_pnl: vec![balance(99, dec!(5)), balance(2, dec!(1))],
            ..Snapshot::default()
        };

        let overview = Overview::merge(&roster(), &snapshot, &RatingThresholds::default());

        let names: Vec<&str> = overview.rows().iter().map(OverviewRow::name).collect();
        assert_eq!(names, vec!["Alba", "Eirean", "Bot 99"]);
    }

    #[test]
    fn pnl_rows_scope_skips_inactive_roster_bots() {
        let snapshot = Snapshot {
            total_pnl: vec![balance(2, dec!(5000))],
            reserve_balance: vec![balance(1, dec!(40)), balance(2, dec!(10))],
            ..Snapshot::default()
        };

        let overview = Overview::merge_scoped(
            MergeScope::PnlRows,
            &roster(),
            &snapshot,
            &RatingThresholds::default(),
        );

        assert_eq!(overview.len(), 1);
        let eirean = &overview.rows()[0];
        assert_eq!(eirean.name(), "Eirean");
        assert_eq!(eirean.reserve_balance.value(), dec!(10));
    }

    #[test]
    fn roster_scope_keeps_inactive_bots() {
        let snapshot = Snapshot {
            total_pnl: vec![balance(2, dec!(5000))],
            ..Snapshot::default()
        };

        let overview = Overview::merge(&roster(), &snapshot, &RatingThresholds::default());

        assert_eq!(overview.len(), 2);
        assert_eq!(overview.rows()[0].total_pnl, Iggt::ZERO);
    }

    #[test]
    fn ranked_sorts_by_pnl_and_keeps_ties_in_order() {
        let snapshot = Snapshot {
            total_pnl: vec![balance(1, dec!(10)), balance(2, dec!(10)), balance(3, dec!(20))],
            ..Snapshot::default()
        };
        let overview = Overview::merge(&roster(), &snapshot, &RatingThresholds::default());

        let ranked: Vec<&str> = overview.ranked().iter().map(|row| row.name()).collect();

        assert_eq!(ranked, vec!["Bot 3", "Alba", "Eirean"]);
    }
}
