//! Engine configuration
//!
//! Every tunable of the forecasting engine lives here. Defaults come from the
//! named constants of the component that uses them, so an empty JSON object
//! deserializes to the stock engine.

use crate::availability;
use crate::error::{ForecastError, Result};
use crate::models::{holt_winters, moving_average, seasonal_weighted, trend};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of days fetched from a series source before the anchor
pub const DEFAULT_LOOKBACK_DAYS: u32 = 760;
/// Longest window, in days, any section may configure
pub const MAX_WINDOW_DAYS: u32 = 3650;
/// Longest seasonal period, one year of hourly readings
pub const MAX_SEASONAL_PERIOD_HOURS: usize = 8760;

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub smoothing: SmoothingConfig,
    pub availability: AvailabilityConfig,
    pub seasonal: SeasonalConfig,
    pub trend: TrendConfig,
    pub moving_average: MovingAverageConfig,
    /// Days of history requested from a [`crate::source::SeriesSource`]
    pub lookback_days: u32,
}

/// Holt-Winters coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmoothingConfig {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub seasonal_period_hours: usize,
}

/// Reference windows and gap detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvailabilityConfig {
    pub multi_year_days: usize,
    /// Fraction of expected hourly points a window needs to count as available
    pub window_coverage: f64,
    pub recent_long_days: u32,
    pub recent_short_days: u32,
    pub gap_threshold_hours: f64,
    pub max_missing_periods: usize,
}

/// Blend of the seasonal-weighted tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeasonalConfig {
    pub last_year_weight: f64,
    pub last_week_weight: f64,
    pub recent_weight: f64,
    pub recent_days: u32,
}

/// Trailing window of the trend tier, in days of hourly points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrendConfig {
    pub window_days: usize,
}

/// Trailing window of the moving-average tier, in days of hourly points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovingAverageConfig {
    pub window_days: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingConfig::default(),
            availability: AvailabilityConfig::default(),
            seasonal: SeasonalConfig::default(),
            trend: TrendConfig::default(),
            moving_average: MovingAverageConfig::default(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: holt_winters::ALPHA,
            beta: holt_winters::BETA,
            gamma: holt_winters::GAMMA,
            seasonal_period_hours: holt_winters::SEASONAL_PERIOD_HOURS,
        }
    }
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            multi_year_days: availability::MULTI_YEAR_DAYS,
            window_coverage: availability::WINDOW_COVERAGE_THRESHOLD,
            recent_long_days: availability::RECENT_LONG_DAYS,
            recent_short_days: availability::RECENT_SHORT_DAYS,
            gap_threshold_hours: availability::GAP_THRESHOLD_HOURS,
            max_missing_periods: availability::MAX_MISSING_PERIODS,
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_days: trend::WINDOW_DAYS,
        }
    }
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            window_days: moving_average::WINDOW_DAYS,
        }
    }
}

impl Default for SeasonalConfig {
    fn default() -> Self {
        Self {
            last_year_weight: seasonal_weighted::LAST_YEAR_WEIGHT,
            last_week_weight: seasonal_weighted::LAST_WEEK_WEIGHT,
            recent_weight: seasonal_weighted::RECENT_WEIGHT,
            recent_days: seasonal_weighted::RECENT_DAYS,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        let s = &self.smoothing;
        for (name, value) in [("alpha", s.alpha), ("beta", s.beta), ("gamma", s.gamma)] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ForecastError::InvalidParameter(format!(
                    "smoothing.{} must be between 0 and 1 (exclusive), got {}",
                    name, value
                )));
            }
        }
        if s.seasonal_period_hours == 0 || s.seasonal_period_hours > MAX_SEASONAL_PERIOD_HOURS {
            return Err(ForecastError::InvalidParameter(format!(
                "smoothing.seasonalPeriodHours must be between 1 and {}, got {}",
                MAX_SEASONAL_PERIOD_HOURS, s.seasonal_period_hours
            )));
        }

        let a = &self.availability;
        if !(a.window_coverage > 0.0 && a.window_coverage <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "availability.windowCoverage must be in (0, 1], got {}",
                a.window_coverage
            )));
        }
        check_window("availability.multiYearDays", a.multi_year_days as u64)?;
        check_window("availability.recentLongDays", u64::from(a.recent_long_days))?;
        check_window("availability.recentShortDays", u64::from(a.recent_short_days))?;
        if !(a.gap_threshold_hours > 0.0) {
            return Err(ForecastError::InvalidParameter(
                "availability.gapThresholdHours must be positive".to_string(),
            ));
        }

        let w = &self.seasonal;
        let weights = [w.last_year_weight, w.last_week_weight, w.recent_weight];
        if weights.iter().any(|v| !(*v >= 0.0)) {
            return Err(ForecastError::InvalidParameter(
                "seasonal weights must be non-negative".to_string(),
            ));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonal weights must sum to 1, got {}",
                total
            )));
        }
        check_window("seasonal.recentDays", u64::from(w.recent_days))?;

        check_window("trend.windowDays", self.trend.window_days as u64)?;
        check_window("movingAverage.windowDays", self.moving_average.window_days as u64)?;
        check_window("lookbackDays", u64::from(self.lookback_days))?;

        Ok(())
    }
}

/// Windows are whole days in `1..=MAX_WINDOW_DAYS`
fn check_window(name: &str, days: u64) -> Result<()> {
    if days == 0 || days > u64::from(MAX_WINDOW_DAYS) {
        return Err(ForecastError::InvalidParameter(format!(
            "{} must be between 1 and {} days, got {}",
            name, MAX_WINDOW_DAYS, days
        )));
    }
    Ok(())
}
