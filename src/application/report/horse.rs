//! Race breakdown for a single horse.

use std::fmt::Write as _;

use tabled::Tabled;

use super::{opt_float, opt_int, rule, table};
use crate::domain::horse::{breakdown_by, Distance, PerformanceBucket, RaceEntry, Surface};

const LATEST_RACES: usize = 10;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Races")]
    races: usize,
    #[tabled(rename = "Avg Pos")]
    avg_position: String,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Wins")]
    wins: usize,
    #[tabled(rename = "Top 3")]
    top_3: usize,
}

impl<K: std::fmt::Display> From<&PerformanceBucket<K>> for BucketRow {
    fn from(bucket: &PerformanceBucket<K>) -> Self {
        Self {
            group: bucket.key.to_string(),
            races: bucket.races,
            avg_position: opt_float(bucket.avg_position, 2),
            best: opt_int(bucket.best_position),
            wins: bucket.wins,
            top_3: bucket.top_3,
        }
    }
}

#[derive(Tabled)]
struct RaceRow {
    #[tabled(rename = "Event")]
    event: i64,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Surface")]
    surface: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Track")]
    track: String,
}

fn banner(out: &mut String, title: &str) {
    writeln!(out).ok();
    writeln!(out, "{}", rule('=', 80)).ok();
    writeln!(out, "{title}").ok();
    writeln!(out, "{}", rule('=', 80)).ok();
}

/// Distance and surface breakdowns plus the latest races, newest first.
#[must_use]
pub fn horse_report(user_horse_id: i64, races: &[RaceEntry]) -> String {
    let mut out = String::new();

    if races.is_empty() {
        writeln!(out, "No entries found for horse {user_horse_id}").ok();
        return out;
    }

    writeln!(
        out,
        "FOUND {} COMPLETE RACE RECORDS FOR HORSE {user_horse_id}",
        races.len()
    ).ok();

    banner(&mut out, "DISTANCE PERFORMANCE");
    let by_distance = breakdown_by(races, |race| Distance::from_code(race.distance));
    writeln!(out, "{}", table(by_distance.iter().map(BucketRow::from))).ok();

    banner(&mut out, "SURFACE PERFORMANCE (DIRT vs TURF)");
    let by_surface = breakdown_by(races, |race| Surface::from_code(race.surface));
    writeln!(out, "{}", table(by_surface.iter().map(BucketRow::from))).ok();

    banner(&mut out, &format!("LATEST RACES (up to {LATEST_RACES})"));
    let latest = races.iter().take(LATEST_RACES).map(|race| RaceRow {
        event: race.event_id,
        distance: Distance::from_code(race.distance).to_string(),
        surface: Surface::from_code(race.surface).to_string(),
        position: opt_int(race.final_position),
        track: race.track_name.clone().unwrap_or_else(|| "-".to_string()),
    });
    writeln!(out, "{}", table(latest)).ok();
    out
}
