//! Plain-text reports.
//!
//! Every report is rendered to a `String`; the CLI decides where it goes.
//! Generation times are passed in so the output is reproducible.

pub mod horse;
pub mod performance;
pub mod stable;
pub mod summary;
pub mod warehouse;

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::insight::FleetTotals;
use crate::domain::money::group_count;
use crate::domain::Overview;

pub use horse::horse_report;
pub use performance::performance_report;
pub use stable::stable_report;
pub use summary::summary_report;
pub use warehouse::{warehouse_report, ReportHeader};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[must_use]
pub(crate) fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// A borderless, space-aligned table.
#[must_use]
pub(crate) fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::blank()).to_string()
}

#[must_use]
pub(crate) fn opt_float(value: Option<f64>, dp: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.dp$}"))
}

#[must_use]
pub(crate) fn opt_int(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Title banner, executive summary and ranked performers.
///
/// Shared by the executive and summary reports.
pub(crate) fn write_summary(out: &mut String, overview: &Overview, generated_at: NaiveDateTime) {
    let stamp = generated_at.format(TIMESTAMP_FORMAT);
    let totals = FleetTotals::from_overview(overview);

    writeln!(out).ok();
    writeln!(out, "BOT PERFORMANCE REPORT - {stamp}").ok();
    writeln!(out, "{}", rule('=', 80)).ok();
    writeln!(out).ok();
    writeln!(out, "EXECUTIVE SUMMARY").ok();
    writeln!(out, "{}", rule('-', 50)).ok();
    writeln!(out).ok();
    writeln!(out, "OVERALL PERFORMANCE").ok();
    writeln!(out, "• Total Bots Active: {}", totals.active_bots).ok();
    writeln!(out, "• Total Races Entered: {}", group_count(totals.total_races)).ok();
    writeln!(out, "• Total P&L (All Bots): {} IGGT", totals.total_pnl).ok();
    writeln!(out, "• Total Reserve Balance: {} IGGT", totals.total_reserve).ok();
    writeln!(out, "• Total In-Play Exposure: {} IGGT", totals.total_in_play).ok();
    writeln!(out).ok();
    writeln!(out, "TOP PERFORMERS").ok();
    writeln!(out, "{}", rule('-', 50)).ok();
    for (rank, row) in overview.ranked().into_iter().enumerate() {
        writeln!(
            out,
            "{}. {} ({}): {} IGGT | {}",
            rank + 1,
            row.name(),
            row.user_id(),
            row.total_pnl,
            row.rating
        ).ok();
    }
}

pub(crate) fn write_footer(out: &mut String, generated_at: NaiveDateTime) {
    writeln!(out).ok();
    writeln!(out, "Report Generated: {}", generated_at.format(TIMESTAMP_FORMAT)).ok();
    writeln!(out, "Internal Use Only - Bot Performance Tracking").ok();
}
