//! Forecasting algorithms, one per tier

use crate::data::{finite_or_zero, HistoricalSeries};
use crate::tier::Tier;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod holt_winters;
pub mod moving_average;
pub mod seasonal_weighted;
pub mod trend;

pub use holt_winters::HoltWintersForecast;
pub use moving_average::MovingAverageForecast;
pub use seasonal_weighted::SeasonalWeightedForecast;
pub use trend::TrendForecast;

/// Forecast value for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub value: f64,
}

impl DailyPrediction {
    /// Create a prediction, coercing non-finite values to zero
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value: finite_or_zero(value),
        }
    }
}

/// Common contract of the tier algorithms.
///
/// `predict` returns exactly `horizon_days` predictions for any series,
/// including an empty one, and never produces NaN or infinite values.
pub trait ForecastAlgorithm: Debug + Send + Sync {
    /// Tier this algorithm serves
    fn tier(&self) -> Tier;

    /// Predict one value per day for the next `horizon_days` days
    fn predict(
        &self,
        series: &HistoricalSeries,
        horizon_days: usize,
        anchor: NaiveDate,
    ) -> Vec<DailyPrediction>;
}

/// Date the observation-anchored tiers count forward from
pub(crate) fn last_observed_date(series: &HistoricalSeries, anchor: NaiveDate) -> NaiveDate {
    series.last().map(|o| o.date()).unwrap_or(anchor)
}
