//! The executive performance report.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use tabled::Tabled;

use super::{rule, table, write_footer, write_summary};
use crate::domain::money::{group_count, group_decimal};
use crate::domain::{Insights, Overview, OverviewRow, RatingThresholds};

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Bot Name")]
    name: String,
    #[tabled(rename = "User ID")]
    user_id: String,
    #[tabled(rename = "Total P&L (IGGT)")]
    total_pnl: String,
    #[tabled(rename = "Reserve Balance (IGGT)")]
    reserve: String,
    #[tabled(rename = "In-Play Balance (IGGT)")]
    in_play: String,
    #[tabled(rename = "Total Races Entered")]
    races: String,
    #[tabled(rename = "Avg P&L per Race")]
    per_race: String,
    #[tabled(rename = "Performance Rating")]
    rating: String,
}

impl From<&OverviewRow> for BreakdownRow {
    fn from(row: &OverviewRow) -> Self {
        Self {
            name: row.name().to_string(),
            user_id: row.user_id().to_string(),
            total_pnl: row.total_pnl.to_string(),
            reserve: row.reserve_balance.to_string(),
            in_play: row.in_play_balance.to_string(),
            races: row.races_entered.to_string(),
            per_race: row.pnl_per_race.to_string(),
            rating: row.rating.to_string(),
        }
    }
}

/// Render the executive report for one overview.
#[must_use]
pub fn performance_report(
    overview: &Overview,
    thresholds: &RatingThresholds,
    generated_at: NaiveDateTime,
) -> String {
    let insights = Insights::derive(overview, thresholds);
    let mut out = String::new();

    write_summary(&mut out, overview, generated_at);

    writeln!(out).ok();
    writeln!(out, "DETAILED BREAKDOWN").ok();
    writeln!(out, "{}", rule('-', 50)).ok();
    if overview.is_empty() {
        writeln!(out, "No bot activity recorded.").ok();
    } else {
        writeln!(out, "{}", table(overview.rows().iter().map(BreakdownRow::from))).ok();
    }

    writeln!(out).ok();
    writeln!(out, "KEY INSIGHTS").ok();
    writeln!(out, "{}", rule('-', 50)).ok();
    writeln!(out).ok();
    write_insights(&mut out, &insights);
    write_footer(&mut out, generated_at);
    out
}

fn write_insights(out: &mut String, insights: &Insights) {
    writeln!(out, "1. PERFORMANCE ANALYSIS:").ok();
    match &insights.best_performer {
        Some(best) => {
            writeln!(out, "   • Best Performer: {} with {} IGGT", best.name, best.value).ok();
        }
        None => {
            writeln!(out, "   • Best Performer: N/A").ok();
        }
    }
    match &insights.most_active {
        Some(active) => {
            writeln!(
                out,
                "   • Most Active: {} with {} races",
                active.name,
                group_count(active.value)
            ).ok();
        }
        None => {
            writeln!(out, "   • Most Active: N/A").ok();
        }
    }
    match &insights.highest_reserve {
        Some(reserve) => {
            writeln!(
                out,
                "   • Highest Reserve: {} with {} IGGT",
                reserve.name, reserve.value
            ).ok();
        }
        None => {
            writeln!(out, "   • Highest Reserve: N/A").ok();
        }
    }

    writeln!(out).ok();
    writeln!(out, "2. RISK ASSESSMENT:").ok();
    writeln!(
        out,
        "   • Total exposure in unsettled races: {} IGGT",
        insights.total_exposure
    ).ok();
    writeln!(
        out,
        "   • Average P&L per race: {}",
        insights
            .avg_pnl_per_race
            .map_or_else(|| "N/A".to_string(), |v| format!("{v} IGGT"))
    ).ok();
    writeln!(
        out,
        "   • Reserve coverage ratio: {}",
        insights
            .reserve_coverage
            .map_or_else(|| "N/A".to_string(), |r| format!("{}x", group_decimal(r, 2)))
    ).ok();

    writeln!(out).ok();
    writeln!(out, "3. RECOMMENDATIONS:").ok();
    for recommendation in &insights.recommendations {
        writeln!(out, "   • {recommendation}").ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metric::{BalanceRecord, RaceCountRecord};
    use crate::domain::{Iggt, Roster, Snapshot, UserId};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn overview() -> Overview {
        let balance = |id, value| BalanceRecord {
            user_id: UserId(id),
            iggt: Iggt::new(value),
        };
        let snapshot = Snapshot {
            total_pnl: vec![balance(10111491, dec!(3500)), balance(10211493, dec!(-12.5))],
            reserve_balance: vec![balance(10111491, dec!(800)), balance(10211493, dec!(2200))],
            in_play_balance: vec![balance(10111491, dec!(400))],
            races_entered: vec![
                RaceCountRecord {
                    user_id: UserId(10111491),
                    races_entered: 1400,
                },
                RaceCountRecord {
                    user_id: UserId(10211493),
                    races_entered: 25,
                },
            ],
            ..Snapshot::default()
        };
        let roster = Roster::new(Roster::house().bots()[..2].to_vec());
        Overview::merge(&roster, &snapshot, &RatingThresholds::default())
    }

    #[test]
    fn report_has_every_section_in_order() {
        let report = performance_report(&overview(), &RatingThresholds::default(), at());

        let sections = [
            "BOT PERFORMANCE REPORT - 2025-10-02 09:30:00",
            "EXECUTIVE SUMMARY",
            "OVERALL PERFORMANCE",
            "TOP PERFORMERS",
            "DETAILED BREAKDOWN",
            "KEY INSIGHTS",
            "1. PERFORMANCE ANALYSIS:",
            "2. RISK ASSESSMENT:",
            "3. RECOMMENDATIONS:",
            "Report Generated: 2025-10-02 09:30:00",
            "Internal Use Only - Bot Performance Tracking",
        ];
        let mut from = 0;
        for section in sections {
            let found = report[from..]
                .find(section)
                .unwrap_or_else(|| panic!("missing or out of order: {section}"));
            from += found + section.len();
        }
    }

    #[test]
    fn summary_totals_and_rankings() {
        let report = performance_report(&overview(), &RatingThresholds::default(), at());

        assert!(report.contains("• Total Bots Active: 2"));
        assert!(report.contains("• Total Races Entered: 1,425"));
        assert!(report.contains("• Total P&L (All Bots): 3,487.50 IGGT"));
        assert!(report.contains("1. Alba (10111491): 3,500.00 IGGT | Excellent"));
        assert!(report.contains("2. Eirean (10211493): -12.50 IGGT | Needs Attention"));
    }

    #[test]
    fn insights_name_the_leaders() {
        let report = performance_report(&overview(), &RatingThresholds::default(), at());

        assert!(report.contains("• Best Performer: Alba with 3,500.00 IGGT"));
        assert!(report.contains("• Most Active: Alba with 1,400 races"));
        assert!(report.contains("• Highest Reserve: Eirean with 2,200.00 IGGT"));
        assert!(report.contains("• Total exposure in unsettled races: 400.00 IGGT"));
        assert!(report.contains("• Reserve coverage ratio: 7.50x"));
    }

    #[test]
    fn empty_overview_still_renders() {
        let report = performance_report(
            &Overview::from_rows(Vec::new()),
            &RatingThresholds::default(),
            at(),
        );
        assert!(report.contains("No bot activity recorded."));
        assert!(report.contains("• Best Performer: N/A"));
        assert!(report.contains("• Reserve coverage ratio: N/A"));
    }
}
