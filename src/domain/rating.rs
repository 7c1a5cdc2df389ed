//! Performance rating tiers.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Iggt;

/// P&L floors for the rating tiers. Both are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingThresholds {
    pub excellent: Decimal,
    pub good: Decimal,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            excellent: Decimal::from(3000),
            good: Decimal::from(2000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceRating {
    Excellent,
    Good,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

impl PerformanceRating {
    #[must_use]
    pub fn classify(pnl: Iggt, thresholds: &RatingThresholds) -> Self {
        if pnl.value() > thresholds.excellent {
            Self::Excellent
        } else if pnl.value() > thresholds.good {
            Self::Good
        } else {
            Self::NeedsAttention
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
