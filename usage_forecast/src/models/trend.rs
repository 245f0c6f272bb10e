//! Trend tier: least-squares slope over the last month, extrapolated

use crate::data::HistoricalSeries;
use crate::models::{last_observed_date, DailyPrediction, ForecastAlgorithm};
use crate::tier::Tier;
use crate::utils::{future_dates, HOURS_PER_DAY};
use chrono::NaiveDate;
use forecast_math::fit_linear;
use tracing::debug;

/// Days of hourly readings the line is fitted over
pub const WINDOW_DAYS: usize = 30;

/// Linear trend extrapolation, dated from the last observed reading.
///
/// Predictions are floored at zero since readings are non-negative magnitudes.
#[derive(Debug, Clone)]
pub struct TrendForecast {
    window_days: usize,
}

impl TrendForecast {
    pub fn new(window_days: usize) -> Self {
        Self { window_days }
    }
}

impl Default for TrendForecast {
    fn default() -> Self {
        Self::new(WINDOW_DAYS)
    }
}

impl ForecastAlgorithm for TrendForecast {
    fn tier(&self) -> Tier {
        Tier::TrendBased
    }

    fn predict(
        &self,
        series: &HistoricalSeries,
        horizon_days: usize,
        anchor: NaiveDate,
    ) -> Vec<DailyPrediction> {
        let values = series.values_abs();
        let window = &values[values.len().saturating_sub(self.window_days * HOURS_PER_DAY)..];
        let fit = fit_linear(window);
        let last_value = values.last().copied().unwrap_or(0.0);
        let start = last_observed_date(series, anchor);

        debug!(
            slope = fit.slope,
            last_value,
            points = window.len(),
            "Trend forecast"
        );

        future_dates(start, horizon_days)
            .into_iter()
            .enumerate()
            .map(|(offset, date)| {
                let steps_ahead = (HOURS_PER_DAY * (offset + 1)) as f64;
                let value = (last_value + fit.slope * steps_ahead).max(0.0);
                DailyPrediction::new(date, value)
            })
            .collect()
    }
}
