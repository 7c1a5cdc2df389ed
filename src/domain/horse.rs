//! Horse-level records, race code decoding and race breakdowns.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::bot::UserId;
use super::money::Iggt;

/// Race distance, stored in the warehouse as a code from 1 to 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    M1000,
    M1200,
    M1400,
    M1600,
    M1800,
    M2000,
    Unknown,
}

impl Distance {
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::M1000,
            Some(2) => Self::M1200,
            Some(3) => Self::M1400,
            Some(4) => Self::M1600,
            Some(5) => Self::M1800,
            Some(6) => Self::M2000,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::M1000 => "1000m (5f)",
            Self::M1200 => "1200m (6f)",
            Self::M1400 => "1400m (7f)",
            Self::M1600 => "1600m (8f)",
            Self::M1800 => "1800m (9f)",
            Self::M2000 => "2000m (10f)",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn category(self) -> DistanceCategory {
        match self {
            Self::M1000 | Self::M1200 => DistanceCategory::Sprint,
            Self::M1400 | Self::M1600 | Self::M1800 => DistanceCategory::Mile,
            Self::M2000 => DistanceCategory::Marathon,
            Self::Unknown => DistanceCategory::Unknown,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DistanceCategory {
    Sprint,
    Mile,
    Marathon,
    Unknown,
}

impl fmt::Display for DistanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sprint => "Sprint",
            Self::Mile => "Mile",
            Self::Marathon => "Marathon",
            Self::Unknown => "Unknown",
        })
    }
}

/// Track surface code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Surface {
    Dirt,
    Turf,
    Unknown,
}

impl Surface {
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Dirt,
            Some(2) => Self::Turf,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dirt => "Dirt",
            Self::Turf => "Turf",
            Self::Unknown => "Unknown",
        })
    }
}

/// Horse grade code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Starter,
    Regular,
    Pro,
    Unknown,
}

impl Grade {
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Starter,
            Some(2) => Self::Regular,
            Some(3) => Self::Pro,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Starter => "Starter",
            Self::Regular => "Regular",
            Self::Pro => "Pro",
            Self::Unknown => "Unknown",
        })
    }
}

/// Aggregated race performance of one horse across its snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorsePerformance {
    pub user_id: UserId,
    pub user_horse_id: i64,
    pub horse_name: String,
    pub generation: Option<i64>,
    pub grade: Option<i64>,
    pub gender: Option<i64>,
    pub age: Option<i64>,
    pub trainer_id: Option<i64>,
    pub total_races: i64,
    pub avg_finish_position: Option<f64>,
    pub wins: i64,
    pub top_3_finishes: i64,
    pub avg_rating: Option<f64>,
    pub avg_speed: Option<f64>,
    pub avg_stamina: Option<f64>,
    pub avg_acceleration: Option<f64>,
    pub career_earnings: Iggt,
}

/// Stable make-up of one bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StableComposition {
    pub user_id: UserId,
    pub total_horses: i64,
    pub grade_1_horses: i64,
    pub grade_2_horses: i64,
    pub grade_3_horses: i64,
    pub bloodline_1_horses: i64,
    pub bloodline_2_horses: i64,
    pub active_horses: i64,
    pub avg_generation: Option<f64>,
}

/// One horse owned by a bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryHorse {
    pub user_id: UserId,
    pub horse_id: i64,
    pub horse_name: String,
    pub grade: Option<i64>,
    pub bloodline: Option<i64>,
    pub generation: Option<i64>,
    pub gender: Option<i64>,
    pub age: Option<i64>,
    pub trainer_id: Option<i64>,
    pub status: Option<i64>,
    pub horse_type_id: Option<i64>,
    pub last_updated: Option<String>,
}

/// Finishing statistics of one horse at one distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistancePerformance {
    pub user_id: UserId,
    pub user_horse_id: i64,
    pub horse_name: String,
    pub distance: Option<i64>,
    pub races: i64,
    pub avg_position: Option<f64>,
    pub best_position: Option<i64>,
    pub worst_position: Option<i64>,
    pub wins: i64,
    pub top_3_finishes: i64,
    pub avg_rating: Option<f64>,
}

/// Finishing statistics of one horse on one surface and going.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePerformance {
    pub user_id: UserId,
    pub user_horse_id: i64,
    pub horse_name: String,
    pub surface: Option<i64>,
    pub weather: Option<i64>,
    pub condition: Option<i64>,
    pub races: i64,
    pub avg_position: Option<f64>,
    pub best_position: Option<i64>,
    pub worst_position: Option<i64>,
    pub wins: i64,
    pub top_3_finishes: i64,
    pub avg_rating: Option<f64>,
}

/// Share of a bot's races falling into one bucket (distance, grade or track).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceMix {
    pub user_id: UserId,
    pub bucket: i64,
    pub total_races: i64,
    pub pct_of_total: f64,
}

impl RaceMix {
    /// Fill `pct_of_total` from each user's race total, rounded to 2 dp.
    #[must_use]
    pub fn with_shares(mut rows: Vec<RaceMix>) -> Vec<RaceMix> {
        let mut totals: BTreeMap<UserId, i64> = BTreeMap::new();
        for row in &rows {
            *totals.entry(row.user_id).or_default() += row.total_races;
        }
        for row in &mut rows {
            let total = totals.get(&row.user_id).copied().unwrap_or(0);
            row.pct_of_total = if total > 0 {
                (row.total_races as f64 * 100.0 / total as f64 * 100.0).round() / 100.0
            } else {
                0.0
            };
        }
        rows
    }
}

/// Distance specialization inferred from a horse's average stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialization {
    MileMarathon,
    Sprint,
    Marathon,
    Mile,
}

impl Specialization {
    #[must_use]
    pub fn infer(horse: &HorsePerformance) -> Self {
        let stamina = horse.avg_stamina.unwrap_or(0.0);
        let speed = horse.avg_speed.unwrap_or(0.0);
        let acceleration = horse.avg_acceleration.unwrap_or(0.0);

        if stamina > 85.0 && speed > 80.0 && acceleration < 75.0 {
            Self::MileMarathon
        } else if stamina < 75.0 && acceleration > 75.0 {
            Self::Sprint
        } else if stamina > 80.0 && speed < 75.0 {
            Self::Marathon
        } else {
            Self::Mile
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MileMarathon => "Mile/Marathon",
            Self::Sprint => "Sprint",
            Self::Marathon => "Marathon",
            Self::Mile => "Mile",
        })
    }
}

/// One race run by a single horse, joined with its event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceEntry {
    pub user_id: UserId,
    pub user_horse_id: i64,
    pub event_id: i64,
    pub final_position: Option<i64>,
    pub stall: Option<i64>,
    pub distance: Option<i64>,
    pub surface: Option<i64>,
    pub weather: Option<i64>,
    pub condition: Option<i64>,
    pub track_name: Option<String>,
    pub zone: Option<String>,
}

/// Finishing statistics for a group of races.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceBucket<K> {
    pub key: K,
    pub races: usize,
    pub avg_position: Option<f64>,
    pub best_position: Option<i64>,
    pub wins: usize,
    pub top_3: usize,
}

/// Group races by `key` and summarise finishing positions within each group.
///
/// Races without a recorded position count toward `races` but not toward the
/// position statistics.
pub fn breakdown_by<K, F>(entries: &[RaceEntry], key: F) -> Vec<PerformanceBucket<K>>
where
    K: Ord + Clone,
    F: Fn(&RaceEntry) -> K,
{
    let mut groups: BTreeMap<K, Vec<&RaceEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(key(entry)).or_default().push(entry);
    }

    groups
        .into_iter()
        .map(|(key, races)| {
            let positions: Vec<i64> = races.iter().filter_map(|r| r.final_position).collect();
            let avg_position = if positions.is_empty() {
                None
            } else {
                Some(positions.iter().sum::<i64>() as f64 / positions.len() as f64)
            };
            PerformanceBucket {
                key,
                races: races.len(),
                avg_position,
                best_position: positions.iter().copied().min(),
                wins: positions.iter().filter(|&&p| p == 1).count(),
                top_3: positions.iter().filter(|&&p| p <= 3).count(),
            }
        })
        .collect()
}
