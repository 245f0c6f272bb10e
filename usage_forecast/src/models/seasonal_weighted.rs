//! Seasonal-weighted tier: blend of last year, last week and the recent month

use crate::availability::one_year_before;
use crate::config::SeasonalConfig;
use crate::data::HistoricalSeries;
use crate::models::{DailyPrediction, ForecastAlgorithm};
use crate::tier::Tier;
use crate::utils::future_dates;
use chrono::{Days, NaiveDate};
use tracing::debug;

/// Weight of the same calendar day one year earlier
pub const LAST_YEAR_WEIGHT: f64 = 0.3;
/// Weight of the same weekday one week earlier
pub const LAST_WEEK_WEIGHT: f64 = 0.5;
/// Weight of the trailing window before the anchor
pub const RECENT_WEIGHT: f64 = 0.2;
/// Length of the trailing window
pub const RECENT_DAYS: u32 = 30;

/// Weighted seasonal blend, dated from the anchor.
///
/// A component without matching readings is replaced by the mean of the
/// whole series.
#[derive(Debug, Clone, Default)]
pub struct SeasonalWeightedForecast {
    config: SeasonalConfig,
}

impl SeasonalWeightedForecast {
    pub fn new(config: SeasonalConfig) -> Self {
        Self { config }
    }
}

impl ForecastAlgorithm for SeasonalWeightedForecast {
    fn tier(&self) -> Tier {
        Tier::SeasonalWeighted
    }

    fn predict(
        &self,
        series: &HistoricalSeries,
        horizon_days: usize,
        anchor: NaiveDate,
    ) -> Vec<DailyPrediction> {
        let fallback = series.mean_abs();
        let recent_start = anchor - Days::new(u64::from(self.config.recent_days));
        let recent = series
            .mean_abs_between(recent_start, anchor)
            .unwrap_or(fallback);

        debug!(fallback, recent, horizon_days, "Seasonal weighted forecast");

        future_dates(anchor, horizon_days)
            .into_iter()
            .map(|date| {
                let last_year_date = one_year_before(date);
                let last_year = series
                    .mean_abs_between(last_year_date, last_year_date)
                    .unwrap_or(fallback);

                let last_week_date = date - Days::new(7);
                let last_week = series
                    .mean_abs_between(last_week_date, last_week_date)
                    .unwrap_or(fallback);

                let value = self.config.last_year_weight * last_year
                    + self.config.last_week_weight * last_week
                    + self.config.recent_weight * recent;

                DailyPrediction::new(date, value)
            })
            .collect()
    }
}
