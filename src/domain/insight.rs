//! Fleet-wide totals and the insights derived from an overview.

use rust_decimal::Decimal;
use serde::Serialize;

use super::bot::UserId;
use super::money::Iggt;
use super::overview::{Overview, OverviewRow};
use super::rating::{PerformanceRating, RatingThresholds};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetTotals {
    pub active_bots: usize,
    pub total_races: i64,
    pub total_pnl: Iggt,
    pub total_reserve: Iggt,
    pub total_in_play: Iggt,
}

impl FleetTotals {
    #[must_use]
    pub fn from_overview(overview: &Overview) -> Self {
        let rows = overview.rows();
        Self {
            active_bots: rows.len(),
            total_races: rows.iter().map(|row| row.races_entered).sum(),
            total_pnl: rows.iter().map(|row| row.total_pnl).sum(),
            total_reserve: rows.iter().map(|row| row.reserve_balance).sum(),
            total_in_play: rows.iter().map(|row| row.in_play_balance).sum(),
        }
    }

    fn bots(&self) -> i64 {
        i64::try_from(self.active_bots).unwrap_or(i64::MAX)
    }

    #[must_use]
    pub fn avg_pnl(&self) -> Iggt {
        self.total_pnl.per(self.bots())
    }

    #[must_use]
    pub fn avg_races(&self) -> Decimal {
        if self.active_bots == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.total_races) / Decimal::from(self.bots())
    }

    #[must_use]
    pub fn avg_reserve(&self) -> Iggt {
        self.total_reserve.per(self.bots())
    }

    #[must_use]
    pub fn avg_in_play(&self) -> Iggt {
        self.total_in_play.per(self.bots())
    }

    /// Fleet P&L per race, `None` when no races were entered.
    #[must_use]
    pub fn pnl_per_race(&self) -> Option<Iggt> {
        if self.total_races == 0 {
            None
        } else {
            Some(self.total_pnl.per(self.total_races))
        }
    }

    /// Reserve divided by in-play exposure, `None` when nothing is in play.
    #[must_use]
    pub fn reserve_coverage(&self) -> Option<Decimal> {
        self.total_reserve.ratio(self.total_in_play)
    }
}

/// The bot leading one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader<T> {
    pub name: String,
    pub user_id: UserId,
    pub value: T,
}

impl<T> Leader<T> {
    fn of(row: &OverviewRow, value: T) -> Self {
        Self {
            name: row.name().to_string(),
            user_id: row.user_id(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub best_performer: Option<Leader<Iggt>>,
    pub most_active: Option<Leader<i64>>,
    pub highest_reserve: Option<Leader<Iggt>>,
    pub total_exposure: Iggt,
    pub avg_pnl_per_race: Option<Iggt>,
    pub reserve_coverage: Option<Decimal>,
    pub recommendations: Vec<String>,
}

impl Insights {
    #[must_use]
    pub fn derive(overview: &Overview, thresholds: &RatingThresholds) -> Self {
        let totals = FleetTotals::from_overview(overview);
        let rows = overview.rows();

        Self {
            best_performer: overview
                .ranked()
                .first()
                .map(|row| Leader::of(row, row.total_pnl)),
            most_active: first_max_by_key(rows, |row| row.races_entered)
                .map(|row| Leader::of(row, row.races_entered)),
            highest_reserve: first_max_by_key(rows, |row| row.reserve_balance)
                .map(|row| Leader::of(row, row.reserve_balance)),
            total_exposure: totals.total_in_play,
            avg_pnl_per_race: totals.pnl_per_race(),
            reserve_coverage: totals.reserve_coverage(),
            recommendations: recommendations(overview, &totals, thresholds),
        }
    }
}

/// The first row holding the maximum key, so ties resolve to table order.
fn first_max_by_key<K, F>(rows: &[OverviewRow], key: F) -> Option<&OverviewRow>
where
    K: Ord,
    F: Fn(&OverviewRow) -> K,
{
    let mut best: Option<&OverviewRow> = None;
    for row in rows {
        match best {
            Some(current) if key(row) <= key(current) => {}
            _ => best = Some(row),
        }
    }
    best
}

fn names(rows: &[&OverviewRow]) -> String {
    rows.iter()
        .map(|row| row.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn recommendations(
    overview: &Overview,
    totals: &FleetTotals,
    thresholds: &RatingThresholds,
) -> Vec<String> {
    let rows = overview.rows();
    if rows.is_empty() {
        return vec!["No bot activity recorded yet".to_string()];
    }

    let mut out = Vec::new();

    let losing: Vec<&OverviewRow> = rows.iter().filter(|row| !row.total_pnl.is_positive()).collect();
    if losing.is_empty() {
        out.push("All bots showing positive performance".to_string());
    } else {
        out.push(format!(
            "{} bot(s) not in profit: {}",
            losing.len(),
            names(&losing)
        ));
    }

    let attention: Vec<&OverviewRow> = rows
        .iter()
        .filter(|row| row.rating == PerformanceRating::NeedsAttention)
        .collect();
    if !attention.is_empty() && attention.len() != losing.len() {
        out.push(format!("Review bots rated Needs Attention: {}", names(&attention)));
    }

    let idle: Vec<&OverviewRow> = rows.iter().filter(|row| row.races_entered == 0).collect();
    if !idle.is_empty() {
        out.push(format!("No races recorded for: {}", names(&idle)));
    }

    match totals.reserve_coverage() {
        None => out.push("No funds currently staked on unsettled races".to_string()),
        Some(ratio) if ratio < Decimal::ONE => out.push(format!(
            "Reserve covers only {}x of in-play exposure; consider topping up",
            ratio.round_dp(2)
        )),
        Some(_) => out.push("Monitor reserve balances for optimal fund management".to_string()),
    }

    let ranked = overview.ranked();
    if let (Some(best), Some(worst)) = (ranked.first(), ranked.last()) {
        let spread = best.total_pnl - worst.total_pnl;
        if ranked.len() > 1 && spread.value() > thresholds.excellent {
            out.push(format!(
                "Consider rebalancing: {} leads {} by {} IGGT",
                best.name(),
                worst.name(),
                spread
            ));
        }
    }

    out
}
