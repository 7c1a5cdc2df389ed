//! CSV export of the per-bot overview.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::domain::Overview;

pub const CSV_HEADER: &str = "Bot Name,User ID,Total P&L (IGGT),Reserve Balance (IGGT),In-Play Balance (IGGT),Total Races,Performance Rating";

/// `bot_performance_YYYYmmdd.csv`
#[must_use]
pub fn default_csv_name(date: NaiveDate) -> String {
    format!("bot_performance_{}.csv", date.format("%Y%m%d"))
}

/// Quote a field when it holds a delimiter, quote or line break.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// The detailed table as CSV. Amounts are plain decimals with two places.
#[must_use]
pub fn csv_export(overview: &Overview) -> String {
    let mut out = String::new();
    writeln!(out, "{CSV_HEADER}").ok();
    for row in overview.rows() {
        writeln!(
            out,
            "{},{},{:.2},{:.2},{:.2},{},{}",
            field(row.name()),
            row.user_id(),
            row.total_pnl.value().round_dp(2),
            row.reserve_balance.value().round_dp(2),
            row.in_play_balance.value().round_dp(2),
            row.races_entered,
            row.rating,
        ).ok();
    }
    out
}
