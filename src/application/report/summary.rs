//! The summary written by `paddock update`.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use super::{rule, write_footer, write_summary};
use crate::domain::money::group_count;
use crate::domain::Overview;

/// Executive summary and rankings followed by one detail block per bot.
#[must_use]
pub fn summary_report(overview: &Overview, generated_at: NaiveDateTime) -> String {
    if overview.is_empty() {
        return "No data available\n".to_string();
    }

    let mut out = String::new();
    write_summary(&mut out, overview, generated_at);

    writeln!(out).ok();
    writeln!(out, "DETAILED BREAKDOWN").ok();
    writeln!(out, "{}", rule('-', 50)).ok();
    for row in overview.rows() {
        writeln!(out).ok();
        writeln!(out, "Bot: {} ({})", row.name(), row.user_id()).ok();
        writeln!(out, "  Total P&L: {} IGGT", row.total_pnl).ok();
        writeln!(out, "  Reserve Balance: {} IGGT", row.reserve_balance).ok();
        writeln!(out, "  In-Play Balance: {} IGGT", row.in_play_balance).ok();
        writeln!(out, "  Total Races: {}", group_count(row.races_entered)).ok();
        writeln!(out, "  Performance: {}", row.rating).ok();
    }

    writeln!(out).ok();
    write_footer(&mut out, generated_at);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bot, Iggt, OverviewRow, PerformanceRating};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 3)
            .unwrap()
            .and_hms_opt(18, 0, 5)
            .unwrap()
    }

    #[test]
    fn each_bot_gets_a_detail_block() {
        let overview = Overview::from_rows(vec![OverviewRow {
            bot: Bot::new(10411491, "Kernow"),
            total_pnl: Iggt::new(dec!(2100)),
            reserve_balance: Iggt::new(dec!(950.25)),
            in_play_balance: Iggt::new(dec!(40)),
            races_entered: 312,
            pnl_per_race: Iggt::new(dec!(6.73)),
            rating: PerformanceRating::Good,
        }]);

        let report = summary_report(&overview, at());

        assert!(report.contains("Bot: Kernow (10411491)"));
        assert!(report.contains("  Reserve Balance: 950.25 IGGT"));
        assert!(report.contains("  Total Races: 312"));
        assert!(report.contains("  Performance: Good"));
        assert!(report.contains("1. Kernow (10411491): 2,100.00 IGGT | Good"));
        assert!(report.ends_with("Internal Use Only - Bot Performance Tracking\n"));
    }

    #[test]
    fn empty_overview_says_so() {
        let report = summary_report(&Overview::from_rows(Vec::new()), at());
        assert_eq!(report, "No data available\n");
    }
}
