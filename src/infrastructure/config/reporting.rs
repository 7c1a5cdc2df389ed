//! Report window, rating thresholds and output location.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::RatingThresholds;
use crate::error::{ConfigError, Result};

/// Activity before this date predates the current bot setup.
#[must_use]
pub fn default_since() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 18).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// First UTC day included in every aggregate.
    pub since: NaiveDate,
    /// Only count unsettled races created within this many hours.
    pub in_play_window_hours: Option<u32>,
    pub excellent_threshold: Decimal,
    pub good_threshold: Decimal,
    /// Directory for generated reports, dashboards and CSV files.
    pub output_dir: PathBuf,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        let thresholds = RatingThresholds::default();
        Self {
            since: default_since(),
            in_play_window_hours: None,
            excellent_threshold: thresholds.excellent,
            good_threshold: thresholds.good,
            output_dir: PathBuf::from("reports"),
        }
    }
}

impl ReportingConfig {
    #[must_use]
    pub fn thresholds(&self) -> RatingThresholds {
        RatingThresholds {
            excellent: self.excellent_threshold,
            good: self.good_threshold,
        }
    }

    pub(super) fn validate(&self) -> Result<()> {
        if self.good_threshold > self.excellent_threshold {
            return Err(ConfigError::InvalidValue {
                field: "reporting.good_threshold",
                reason: "must not exceed excellent_threshold".to_string(),
            }
            .into());
        }
        if self.in_play_window_hours == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "reporting.in_play_window_hours",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
