//! Result row types for the warehouse queries.
//!
//! Every column is cast in SQL to a 64-bit integer, a double or text, so one
//! set of field types decodes on both backends.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};

use crate::domain::horse::{
    DistancePerformance, HorsePerformance, InventoryHorse, RaceEntry, RaceMix, StableComposition,
    SurfacePerformance,
};
use crate::domain::metric::{BalanceRecord, DailyPnlRecord, RaceCountRecord};
use crate::domain::{Iggt, UserId};

/// Conversion from a raw row into its domain record.
pub trait IntoRecord {
    type Record;

    fn into_record(self) -> Result<Self::Record, String>;
}

/// `user_id` plus a summed micro-unit amount.
#[derive(QueryableByName, Debug, Clone)]
pub struct AmountRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub micros: Option<i64>,
}

impl IntoRecord for AmountRow {
    type Record = BalanceRecord;

    fn into_record(self) -> Result<BalanceRecord, String> {
        Ok(BalanceRecord {
            user_id: UserId(self.user_id),
            iggt: Iggt::from_micros(self.micros.unwrap_or(0)),
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct RaceCountRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = BigInt)]
    pub races_entered: i64,
}

impl IntoRecord for RaceCountRow {
    type Record = RaceCountRecord;

    fn into_record(self) -> Result<RaceCountRecord, String> {
        Ok(RaceCountRecord {
            user_id: UserId(self.user_id),
            races_entered: self.races_entered,
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct DailyRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = Text)]
    pub day: String,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub micros: Option<i64>,
}

impl IntoRecord for DailyRow {
    type Record = DailyPnlRecord;

    fn into_record(self) -> Result<DailyPnlRecord, String> {
        let date = NaiveDate::parse_from_str(&self.day, "%Y-%m-%d")
            .map_err(|e| format!("bad day '{}': {e}", self.day))?;
        Ok(DailyPnlRecord {
            user_id: UserId(self.user_id),
            date,
            iggt: Iggt::from_micros(self.micros.unwrap_or(0)),
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct HorsePerformanceRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = BigInt)]
    pub user_horse_id: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub horse_name: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub generation: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub grade: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub gender: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub age: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub trainer_id: Option<i64>,
    #[diesel(sql_type = BigInt)]
    pub total_races: i64,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_finish_position: Option<f64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub wins: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub top_3_finishes: Option<i64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_rating: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_speed: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_stamina: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_acceleration: Option<f64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub career_micros: Option<i64>,
}

impl IntoRecord for HorsePerformanceRow {
    type Record = HorsePerformance;

    fn into_record(self) -> Result<HorsePerformance, String> {
        Ok(HorsePerformance {
            user_id: UserId(self.user_id),
            user_horse_id: self.user_horse_id,
            horse_name: self.horse_name.unwrap_or_default(),
            generation: self.generation,
            grade: self.grade,
            gender: self.gender,
            age: self.age,
            trainer_id: self.trainer_id,
            total_races: self.total_races,
            avg_finish_position: self.avg_finish_position,
            wins: self.wins.unwrap_or(0),
            top_3_finishes: self.top_3_finishes.unwrap_or(0),
            avg_rating: self.avg_rating,
            avg_speed: self.avg_speed,
            avg_stamina: self.avg_stamina,
            avg_acceleration: self.avg_acceleration,
            career_earnings: Iggt::from_micros(self.career_micros.unwrap_or(0)),
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct StableCompositionRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = BigInt)]
    pub total_horses: i64,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub grade_1_horses: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub grade_2_horses: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub grade_3_horses: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub bloodline_1_horses: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub bloodline_2_horses: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub active_horses: Option<i64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_generation: Option<f64>,
}

impl IntoRecord for StableCompositionRow {
    type Record = StableComposition;

    fn into_record(self) -> Result<StableComposition, String> {
        Ok(StableComposition {
            user_id: UserId(self.user_id),
            total_horses: self.total_horses,
            grade_1_horses: self.grade_1_horses.unwrap_or(0),
            grade_2_horses: self.grade_2_horses.unwrap_or(0),
            grade_3_horses: self.grade_3_horses.unwrap_or(0),
            bloodline_1_horses: self.bloodline_1_horses.unwrap_or(0),
            bloodline_2_horses: self.bloodline_2_horses.unwrap_or(0),
            active_horses: self.active_horses.unwrap_or(0),
            avg_generation: self.avg_generation,
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct InventoryRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = BigInt)]
    pub horse_id: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub horse_name: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub grade: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub bloodline: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub generation: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub gender: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub age: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub trainer_id: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub status: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub horse_type_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub last_updated: Option<String>,
}

impl IntoRecord for InventoryRow {
    type Record = InventoryHorse;

    fn into_record(self) -> Result<InventoryHorse, String> {
        Ok(InventoryHorse {
            user_id: UserId(self.user_id),
            horse_id: self.horse_id,
            horse_name: self.horse_name.unwrap_or_default(),
            grade: self.grade,
            bloodline: self.bloodline,
            generation: self.generation,
            gender: self.gender,
            age: self.age,
            trainer_id: self.trainer_id,
            status: self.status,
            horse_type_id: self.horse_type_id,
            last_updated: self.last_updated,
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct DistancePerformanceRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = BigInt)]
    pub user_horse_id: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub horse_name: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub distance: Option<i64>,
    #[diesel(sql_type = BigInt)]
    pub races: i64,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_position: Option<f64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub best_position: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub worst_position: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub wins: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub top_3_finishes: Option<i64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_rating: Option<f64>,
}

impl IntoRecord for DistancePerformanceRow {
    type Record = DistancePerformance;

    fn into_record(self) -> Result<DistancePerformance, String> {
        Ok(DistancePerformance {
            user_id: UserId(self.user_id),
            user_horse_id: self.user_horse_id,
            horse_name: self.horse_name.unwrap_or_default(),
            distance: self.distance,
            races: self.races,
            avg_position: self.avg_position,
            best_position: self.best_position,
            worst_position: self.worst_position,
            wins: self.wins.unwrap_or(0),
            top_3_finishes: self.top_3_finishes.unwrap_or(0),
            avg_rating: self.avg_rating,
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct SurfacePerformanceRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = BigInt)]
    pub user_horse_id: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub horse_name: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub surface: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub weather: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub track_condition: Option<i64>,
    #[diesel(sql_type = BigInt)]
    pub races: i64,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_position: Option<f64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub best_position: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub worst_position: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub wins: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub top_3_finishes: Option<i64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_rating: Option<f64>,
}

impl IntoRecord for SurfacePerformanceRow {
    type Record = SurfacePerformance;

    fn into_record(self) -> Result<SurfacePerformance, String> {
        Ok(SurfacePerformance {
            user_id: UserId(self.user_id),
            user_horse_id: self.user_horse_id,
            horse_name: self.horse_name.unwrap_or_default(),
            surface: self.surface,
            weather: self.weather,
            condition: self.track_condition,
            races: self.races,
            avg_position: self.avg_position,
            best_position: self.best_position,
            worst_position: self.worst_position,
            wins: self.wins.unwrap_or(0),
            top_3_finishes: self.top_3_finishes.unwrap_or(0),
            avg_rating: self.avg_rating,
        })
    }
}

/// Race count per bucket (distance, grade or track id).
#[derive(QueryableByName, Debug, Clone)]
pub struct MixRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub bucket: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub total_races: Option<i64>,
}

impl IntoRecord for MixRow {
    type Record = RaceMix;

    fn into_record(self) -> Result<RaceMix, String> {
        Ok(RaceMix {
            user_id: UserId(self.user_id),
            bucket: self.bucket.unwrap_or(0),
            total_races: self.total_races.unwrap_or(0),
            pct_of_total: 0.0,
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct RaceEntryRow {
    #[diesel(sql_type = BigInt)]
    pub user_id: i64,
    #[diesel(sql_type = BigInt)]
    pub user_horse_id: i64,
    #[diesel(sql_type = BigInt)]
    pub event_id: i64,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub final_position: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub stall: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub distance: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub surface: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub weather: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub track_condition: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub track_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub zone: Option<String>,
}

impl IntoRecord for RaceEntryRow {
    type Record = RaceEntry;

    fn into_record(self) -> Result<RaceEntry, String> {
        Ok(RaceEntry {
            user_id: UserId(self.user_id),
            user_horse_id: self.user_horse_id,
            event_id: self.event_id,
            final_position: self.final_position,
            stall: self.stall,
            distance: self.distance,
            surface: self.surface,
            weather: self.weather,
            condition: self.track_condition,
            track_name: self.track_name,
            zone: self.zone,
        })
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct RowCount {
    #[diesel(sql_type = BigInt)]
    pub row_count: i64,
}
