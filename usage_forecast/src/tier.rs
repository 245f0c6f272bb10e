//! Forecasting tiers and their selection

use crate::availability::DataAvailability;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completeness a multi-year series needs before Holt-Winters is trusted
pub const HOLT_WINTERS_MIN_COMPLETENESS: u8 = 80;

/// Forecasting algorithm ranked by how much history it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    HoltWinters,
    SeasonalWeighted,
    TrendBased,
    MovingAverage,
    InsufficientData,
}

impl Tier {
    /// Every tier, highest priority first
    pub const ALL: [Tier; 5] = [
        Tier::HoltWinters,
        Tier::SeasonalWeighted,
        Tier::TrendBased,
        Tier::MovingAverage,
        Tier::InsufficientData,
    ];

    /// Wire tag, e.g. `HOLT_WINTERS`
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::HoltWinters => "HOLT_WINTERS",
            Tier::SeasonalWeighted => "SEASONAL_WEIGHTED",
            Tier::TrendBased => "TREND_BASED",
            Tier::MovingAverage => "MOVING_AVERAGE",
            Tier::InsufficientData => "INSUFFICIENT_DATA",
        }
    }

    /// Human readable name shown on the dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::HoltWinters => "Holt-Winters Seasonal",
            Tier::SeasonalWeighted => "Seasonal Weighted",
            Tier::TrendBased => "Trend Based",
            Tier::MovingAverage => "Moving Average",
            Tier::InsufficientData => "Insufficient Data",
        }
    }

    /// Bind the tier to its confidence profile
    pub fn descriptor(self) -> TierDescriptor {
        let (confidence, accuracy_stars, warning) = match self {
            Tier::HoltWinters => (95, Some(5), None),
            Tier::SeasonalWeighted => (
                80,
                Some(4),
                Some("Partial historical data available; using a simplified seasonal algorithm"),
            ),
            Tier::TrendBased => (
                65,
                Some(3),
                Some("No last-year data available; forecast follows the recent trend only"),
            ),
            Tier::MovingAverage => (
                50,
                Some(2),
                Some("Low accuracy: not enough history for seasonal or trend analysis"),
            ),
            Tier::InsufficientData => (
                0,
                None,
                Some("Cannot generate a reliable prediction: fewer than 7 days of history"),
            ),
        };

        TierDescriptor {
            tier: self,
            display_name: self.display_name().to_string(),
            confidence,
            accuracy_stars,
            warning: warning.map(str::to_string),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tier together with the confidence signal reported alongside its forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDescriptor {
    pub tier: Tier,
    pub display_name: String,
    /// 0 to 100
    pub confidence: u8,
    /// 1 to 5, absent when no forecast is produced
    pub accuracy_stars: Option<u8>,
    pub warning: Option<String>,
}

/// Pick the forecasting tier for an availability report.
///
/// Rules are checked in priority order and the first match wins.
pub fn select_tier(availability: &DataAvailability) -> TierDescriptor {
    let tier = if availability.has_multi_year_cycle
        && availability.completeness_score >= HOLT_WINTERS_MIN_COMPLETENESS
    {
        Tier::HoltWinters
    } else if availability.has_last_year_window && availability.has_recent_30_days {
        Tier::SeasonalWeighted
    } else if availability.has_recent_30_days {
        Tier::TrendBased
    } else if availability.has_recent_7_days {
        Tier::MovingAverage
    } else {
        Tier::InsufficientData
    };

    tier.descriptor()
}
