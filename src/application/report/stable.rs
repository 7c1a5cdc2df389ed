//! Horse-level stable report.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use tabled::Tabled;

use super::{opt_float, opt_int, rule, table, TIMESTAMP_FORMAT};
use crate::domain::horse::{Distance, Grade, RaceMix, Specialization, Surface};
use crate::domain::money::group_count;
use crate::domain::{Roster, Snapshot};
use crate::port::outbound::warehouse::QueryName;

const TOP_HORSES: usize = 10;

#[derive(Tabled)]
struct CompositionRow {
    #[tabled(rename = "Bot")]
    bot: String,
    #[tabled(rename = "Horses")]
    total: i64,
    #[tabled(rename = "Grade 1")]
    grade_1: i64,
    #[tabled(rename = "Grade 2")]
    grade_2: i64,
    #[tabled(rename = "Grade 3")]
    grade_3: i64,
    #[tabled(rename = "Bloodline 1")]
    bloodline_1: i64,
    #[tabled(rename = "Bloodline 2")]
    bloodline_2: i64,
    #[tabled(rename = "Active")]
    active: i64,
    #[tabled(rename = "Avg Gen")]
    avg_generation: String,
}

#[derive(Tabled)]
struct TopHorseRow {
    #[tabled(rename = "Bot")]
    bot: String,
    #[tabled(rename = "Horse")]
    horse: String,
    #[tabled(rename = "Races")]
    races: i64,
    #[tabled(rename = "Avg Pos")]
    avg_position: String,
    #[tabled(rename = "Wins")]
    wins: i64,
    #[tabled(rename = "Top 3")]
    top_3: i64,
    #[tabled(rename = "Earnings (IGGT)")]
    earnings: String,
    #[tabled(rename = "Specialization")]
    specialization: String,
}

#[derive(Tabled)]
struct MixRow {
    #[tabled(rename = "Bot")]
    bot: String,
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Races")]
    races: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Bot")]
    bot: String,
    #[tabled(rename = "Horse")]
    horse: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Races")]
    races: i64,
    #[tabled(rename = "Avg Pos")]
    avg_position: String,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Wins")]
    wins: i64,
    #[tabled(rename = "Top 3")]
    top_3: i64,
}

fn heading(out: &mut String, title: &str) {
    writeln!(out).ok();
    writeln!(out, "{title}").ok();
    writeln!(out, "{}", rule('-', 50)).ok();
}

/// Write a section body: the query error, the table, or a placeholder.
fn body(out: &mut String, snapshot: &Snapshot, query: QueryName, rendered: Option<String>) {
    let text = match (snapshot.failure(query.name()), rendered) {
        (Some(message), _) => format!("Error: {message}"),
        (None, Some(rendered)) => rendered,
        (None, None) => "No results found for this query.".to_string(),
    };
    writeln!(out, "{text}").ok();
}

fn mix_table(roster: &Roster, rows: &[RaceMix], label: fn(i64) -> String) -> Option<String> {
    (!rows.is_empty()).then(|| {
        table(rows.iter().map(|row| MixRow {
            bot: roster.name_of(row.user_id),
            bucket: label(row.bucket),
            races: group_count(row.total_races),
            share: format!("{:.2}%", row.pct_of_total),
        }))
    })
}

/// Render the stable report from a snapshot fetched with horse data.
#[must_use]
pub fn stable_report(roster: &Roster, snapshot: &Snapshot, generated_at: NaiveDateTime) -> String {
    let horses = &snapshot.horses;
    let mut out = String::new();

    writeln!(out).ok();
    writeln!(
        out,
        "STABLE REPORT - {}",
        generated_at.format(TIMESTAMP_FORMAT)
    ).ok();
    writeln!(out, "{}", rule('=', 80)).ok();

    if horses.is_empty() && QueryName::HORSE.iter().all(|q| snapshot.failure(q.name()).is_none()) {
        writeln!(out).ok();
        writeln!(out, "No horse-level data available.").ok();
        return out;
    }

    heading(&mut out, "STABLE COMPOSITION");
    let composition = (!horses.stable_composition.is_empty()).then(|| {
        table(horses.stable_composition.iter().map(|s| CompositionRow {
            bot: roster.name_of(s.user_id),
            total: s.total_horses,
            grade_1: s.grade_1_horses,
            grade_2: s.grade_2_horses,
            grade_3: s.grade_3_horses,
            bloodline_1: s.bloodline_1_horses,
            bloodline_2: s.bloodline_2_horses,
            active: s.active_horses,
            avg_generation: opt_float(s.avg_generation, 1),
        }))
    });
    body(&mut out, snapshot, QueryName::StableComposition, composition);

    heading(&mut out, "TOP HORSES BY RACES");
    let mut ranked: Vec<_> = horses.horse_performance.iter().collect();
    ranked.sort_by(|a, b| b.total_races.cmp(&a.total_races));
    let top = (!ranked.is_empty()).then(|| {
        table(ranked.iter().take(TOP_HORSES).map(|h| TopHorseRow {
            bot: roster.name_of(h.user_id),
            horse: h.horse_name.clone(),
            races: h.total_races,
            avg_position: opt_float(h.avg_finish_position, 2),
            wins: h.wins,
            top_3: h.top_3_finishes,
            earnings: h.career_earnings.to_string(),
            specialization: Specialization::infer(h).to_string(),
        }))
    });
    body(&mut out, snapshot, QueryName::HorsePerformance, top);

    heading(&mut out, "DISTANCE MIX");
    let distance_mix = mix_table(roster, &horses.distance_mix, |code| {
        Distance::from_code(Some(code)).to_string()
    });
    body(&mut out, snapshot, QueryName::DistanceMix, distance_mix);

    heading(&mut out, "GRADE MIX");
    let grade_mix = mix_table(roster, &horses.grade_mix, |code| {
        Grade::from_code(Some(code)).to_string()
    });
    body(&mut out, snapshot, QueryName::GradeMix, grade_mix);

    heading(&mut out, "TRACK MIX");
    let track_mix = mix_table(roster, &horses.track_mix, |code| format!("Track {code}"));
    body(&mut out, snapshot, QueryName::TrackMix, track_mix);

    heading(&mut out, "DISTANCE PERFORMANCE");
    let distance = (!horses.distance_performance.is_empty()).then(|| {
        table(horses.distance_performance.iter().map(|d| PerformanceRow {
            bot: roster.name_of(d.user_id),
            horse: d.horse_name.clone(),
            group: Distance::from_code(d.distance).to_string(),
            races: d.races,
            avg_position: opt_float(d.avg_position, 2),
            best: opt_int(d.best_position),
            wins: d.wins,
            top_3: d.top_3_finishes,
        }))
    });
    body(&mut out, snapshot, QueryName::DistancePerformance, distance);

    heading(&mut out, "SURFACE PERFORMANCE");
    let surface = (!horses.surface_performance.is_empty()).then(|| {
        table(horses.surface_performance.iter().map(|s| PerformanceRow {
            bot: roster.name_of(s.user_id),
            horse: s.horse_name.clone(),
            group: Surface::from_code(s.surface).to_string(),
            races: s.races,
            avg_position: opt_float(s.avg_position, 2),
            best: opt_int(s.best_position),
            wins: s.wins,
            top_3: s.top_3_finishes,
        }))
    });
    body(&mut out, snapshot, QueryName::SurfacePerformance, surface);

    out
}
