//! The dashboard page.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::chart::{
    bar_chart, grouped_bar_chart, line_chart, scatter_chart, ColorScale, ScatterPoint, Series,
    IN_PLAY_COLOR, RESERVE_COLOR,
};
use super::escape;
use crate::application::report::TIMESTAMP_FORMAT;
use crate::domain::metric::DailyPnlRecord;
use crate::domain::money::{group_count, group_decimal};
use crate::domain::{FleetTotals, Overview, PerformanceRating};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
header { background: #1f2d3d; color: #fff; padding: 18px 32px; }
header h1 { margin: 0; font-size: 24px; }
main { padding: 24px 32px; }
.cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin-bottom: 24px; }
.card { background: #fff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.card .label { font-size: 13px; color: #666; }
.card .value { font-size: 26px; font-weight: 600; margin: 6px 0; }
.card .avg { font-size: 12px; color: #888; }
.charts { display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px; margin-bottom: 24px; }
.chart { background: #fff; border-radius: 8px; width: 100%; height: auto; }
.chart-title { font-size: 15px; font-weight: 600; }
.tick, .legend, .point-label { font-size: 11px; fill: #555; }
.axis-title { font-size: 12px; fill: #333; }
.grid { stroke: #e5e5e5; }
.baseline { stroke: #999; }
table { border-collapse: collapse; width: 100%; background: #fff; }
th, td { padding: 8px 12px; border-bottom: 1px solid #eee; text-align: right; }
th:first-child, td:first-child { text-align: left; }
.negative { color: #c0392b; }
.badge { padding: 2px 8px; border-radius: 10px; font-size: 12px; color: #fff; }
.badge.excellent { background: #1a9850; }
.badge.good { background: #91cf60; color: #222; }
.badge.attention { background: #d73027; }
footer { padding: 12px 32px 32px; font-size: 12px; color: #777; }
"#;

/// Where the dashboard's numbers came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardSource {
    /// Read from a saved snapshot file.
    Static { data_file: String },
    /// Fetched from the warehouse while rendering.
    Live { database: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    pub overview: Overview,
    pub daily: Vec<DailyPnlRecord>,
    pub source: DashboardSource,
    pub last_updated: Option<DateTime<Utc>>,
    pub generated_at: NaiveDateTime,
}

fn card(out: &mut String, label: &str, value: &str, avg: &str) {
    write!(
        out,
        r#"<div class="card"><div class="label">{}</div><div class="value">{}</div><div class="avg">{}</div></div>"#,
        escape(label),
        escape(value),
        escape(avg),
    ).ok();
}

fn badge(rating: PerformanceRating) -> &'static str {
    match rating {
        PerformanceRating::Excellent => "excellent",
        PerformanceRating::Good => "good",
        PerformanceRating::NeedsAttention => "attention",
    }
}

fn cards(out: &mut String, totals: &FleetTotals) {
    out.push_str(r#"<section class="cards">"#);
    card(
        out,
        "Total P&L",
        &format!("{} IGGT", totals.total_pnl),
        &format!("Avg per bot: {} IGGT", totals.avg_pnl()),
    );
    card(
        out,
        "Total Races",
        &group_count(totals.total_races),
        &format!("Avg per bot: {}", group_decimal(totals.avg_races(), 1)),
    );
    card(
        out,
        "Total Reserve",
        &format!("{} IGGT", totals.total_reserve),
        &format!("Avg per bot: {} IGGT", totals.avg_reserve()),
    );
    card(
        out,
        "In-Play Exposure",
        &format!("{} IGGT", totals.total_in_play),
        &format!("Avg per bot: {} IGGT", totals.avg_in_play()),
    );
    out.push_str("</section>");
}

fn charts(out: &mut String, model: &DashboardModel) {
    let rows = model.overview.rows();
    let names: Vec<String> = rows.iter().map(|row| row.name().to_string()).collect();

    out.push_str(r#"<section class="charts">"#);

    let pnl: Vec<(String, f64)> = rows
        .iter()
        .map(|row| (row.name().to_string(), row.total_pnl.to_f64()))
        .collect();
    out.push_str(&bar_chart(
        "Total P&L by Bot",
        "Bot Name",
        "P&L (IGGT)",
        &pnl,
        ColorScale::RdYlGn,
    ));

    let races: Vec<(String, f64)> = rows
        .iter()
        .map(|row| (row.name().to_string(), row.races_entered as f64))
        .collect();
    out.push_str(&bar_chart(
        "Total Races by Bot",
        "Bot Name",
        "Races",
        &races,
        ColorScale::Blues,
    ));

    out.push_str(&grouped_bar_chart(
        "Reserve vs In-Play Balance",
        "Bot Name",
        "IGGT",
        &names,
        &[
            Series {
                name: "Reserve Balance",
                color: RESERVE_COLOR,
                values: rows.iter().map(|row| row.reserve_balance.to_f64()).collect(),
            },
            Series {
                name: "In-Play Balance",
                color: IN_PLAY_COLOR,
                values: rows.iter().map(|row| row.in_play_balance.to_f64()).collect(),
            },
        ],
    ));

    let points: Vec<ScatterPoint> = rows
        .iter()
        .map(|row| ScatterPoint {
            label: row.name().to_string(),
            x: row.races_entered as f64,
            y: row.total_pnl.to_f64(),
            size: row.pnl_per_race.to_f64(),
        })
        .collect();
    out.push_str(&scatter_chart(
        "P&L vs Races Entered",
        "Races Entered",
        "Total P&L (IGGT)",
        &points,
    ));

    if !model.daily.is_empty() {
        out.push_str(&line_chart(
            "Daily P&L by Bot",
            "Date",
            "P&L (IGGT)",
            &daily_series(&model.overview, &model.daily),
        ));
    }

    out.push_str("</section>");
}

/// Daily points grouped per bot, in overview order. Unknown ids are skipped.
fn daily_series(overview: &Overview, daily: &[DailyPnlRecord]) -> Vec<(String, Vec<(NaiveDate, f64)>)> {
    let mut by_user: BTreeMap<i64, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for record in daily {
        by_user
            .entry(record.user_id.get())
            .or_default()
            .push((record.date, record.iggt.to_f64()));
    }

    overview
        .rows()
        .iter()
        .filter_map(|row| {
            by_user
                .remove(&row.user_id().get())
                .map(|points| (row.name().to_string(), points))
        })
        .collect()
}

fn detail_table(out: &mut String, overview: &Overview) {
    out.push_str(
        "<section><h2>Detailed Performance</h2><table><thead><tr>\
         <th>Bot Name</th><th>User ID</th><th>Total P&amp;L (IGGT)</th>\
         <th>Reserve Balance (IGGT)</th><th>In-Play Balance (IGGT)</th>\
         <th>Total Races</th><th>P&amp;L per Race</th><th>Performance</th>\
         </tr></thead><tbody>",
    );
    for row in overview.rows() {
        let pnl_class = if row.total_pnl.value().is_sign_negative() && !row.total_pnl.is_zero() {
            r#" class="negative""#
        } else {
            ""
        };
        write!(
            out,
            r#"<tr><td>{name}</td><td>{id}</td><td{pnl_class}>{pnl}</td><td>{reserve}</td><td>{in_play}</td><td>{races}</td><td>{per_race}</td><td><span class="badge {badge}">{rating}</span></td></tr>"#,
            name = escape(row.name()),
            id = row.user_id(),
            pnl = row.total_pnl,
            reserve = row.reserve_balance,
            in_play = row.in_play_balance,
            races = group_count(row.races_entered),
            per_race = row.pnl_per_race,
            badge = badge(row.rating),
            rating = row.rating,
        ).ok();
    }
    if overview.is_empty() {
        out.push_str(r#"<tr><td colspan="8">No bot activity recorded.</td></tr>"#);
    }
    out.push_str("</tbody></table></section>");
}

fn footer(out: &mut String, model: &DashboardModel) {
    out.push_str("<footer>");
    match model.last_updated {
        Some(at) => {
            write!(
                out,
                "<p>Data last updated: {} UTC</p>",
                at.format(TIMESTAMP_FORMAT)
            ).ok();
        }
        None => out.push_str("<p>No update timestamp found</p>"),
    }
    match &model.source {
        DashboardSource::Static { data_file } => {
            write!(
                out,
                "<p>Static dashboard built from {}. Run <code>paddock update</code> to refresh.</p>",
                escape(data_file)
            ).ok();
        }
        DashboardSource::Live { database } => {
            write!(out, "<p>Live data from {}.</p>", escape(database)).ok();
        }
    }
    write!(
        out,
        "<p>Generated: {}</p></footer>",
        model.generated_at.format(TIMESTAMP_FORMAT)
    ).ok();
}

/// Render the whole page as one HTML document.
#[must_use]
pub fn render_dashboard(model: &DashboardModel) -> String {
    let totals = FleetTotals::from_overview(&model.overview);
    let mut out = String::new();

    write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>Bot Performance Dashboard</title><style>{STYLE}</style></head><body>\
         <header><h1>Bot Performance Dashboard</h1></header><main>"
    ).ok();
    cards(&mut out, &totals);
    charts(&mut out, model);
    detail_table(&mut out, &model.overview);
    out.push_str("</main>");
    footer(&mut out, model);
    out.push_str("</body></html>\n");
    out
}
