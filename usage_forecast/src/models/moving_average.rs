//! Moving-average tier: the last week's mean, held flat

use crate::data::HistoricalSeries;
use crate::models::{last_observed_date, DailyPrediction, ForecastAlgorithm};
use crate::tier::Tier;
use crate::utils::{future_dates, HOURS_PER_DAY};
use chrono::NaiveDate;
use forecast_math::trailing_mean;
use tracing::debug;

/// Days of hourly readings averaged
pub const WINDOW_DAYS: usize = 7;

/// Flat forecast at the trailing mean, dated from the last observed reading
#[derive(Debug, Clone)]
pub struct MovingAverageForecast {
    window_days: usize,
}

impl MovingAverageForecast {
    pub fn new(window_days: usize) -> Self {
        Self { window_days }
    }
}

impl Default for MovingAverageForecast {
    fn default() -> Self {
        Self::new(WINDOW_DAYS)
    }
}

impl ForecastAlgorithm for MovingAverageForecast {
    fn tier(&self) -> Tier {
        Tier::MovingAverage
    }

    fn predict(
        &self,
        series: &HistoricalSeries,
        horizon_days: usize,
        anchor: NaiveDate,
    ) -> Vec<DailyPrediction> {
        let average = trailing_mean(&series.values_abs(), self.window_days * HOURS_PER_DAY);
        let start = last_observed_date(series, anchor);

        debug!(average, window_days = self.window_days, "Moving average forecast");

        future_dates(start, horizon_days)
            .into_iter()
            .map(|date| DailyPrediction::new(date, average))
            .collect()
    }
}
