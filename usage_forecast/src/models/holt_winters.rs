//! Holt-Winters tier: triple exponential smoothing over a weekly cycle

use crate::aggregate::{aggregate_daily, HourlyForecast};
use crate::config::SmoothingConfig;
use crate::data::{finite_or_zero, HistoricalSeries};
use crate::models::{DailyPrediction, ForecastAlgorithm};
use crate::tier::Tier;
use crate::utils::{future_hours, HOURS_PER_DAY};
use chrono::NaiveDate;
use forecast_math::{Smoother, TripleExponentialSmoothing};
use tracing::{debug, warn};

/// Level smoothing coefficient
pub const ALPHA: f64 = 0.5;
/// Trend smoothing coefficient
pub const BETA: f64 = 0.4;
/// Seasonal smoothing coefficient
pub const GAMMA: f64 = 0.3;
/// One week of hourly readings
pub const SEASONAL_PERIOD_HOURS: usize = 7 * 24;

/// Hourly Holt-Winters forecast aggregated to days, dated from the anchor
#[derive(Debug)]
pub struct HoltWintersForecast {
    params: SmoothingConfig,
    smoother: Box<dyn Smoother>,
}

impl HoltWintersForecast {
    /// Use the built-in triple exponential smoothing
    pub fn new(params: SmoothingConfig) -> Self {
        Self::with_smoother(params, Box::new(TripleExponentialSmoothing::new()))
    }

    /// Use any smoothing implementation
    pub fn with_smoother(params: SmoothingConfig, smoother: Box<dyn Smoother>) -> Self {
        Self { params, smoother }
    }

    pub fn params(&self) -> &SmoothingConfig {
        &self.params
    }
}

impl Default for HoltWintersForecast {
    fn default() -> Self {
        Self::new(SmoothingConfig::default())
    }
}

impl ForecastAlgorithm for HoltWintersForecast {
    fn tier(&self) -> Tier {
        Tier::HoltWinters
    }

    fn predict(
        &self,
        series: &HistoricalSeries,
        horizon_days: usize,
        anchor: NaiveDate,
    ) -> Vec<DailyPrediction> {
        let steps = horizon_days * HOURS_PER_DAY;
        let values = series.values_abs();

        let smoothed = match self.smoother.smooth(
            &values,
            self.params.seasonal_period_hours,
            self.params.alpha,
            self.params.beta,
            self.params.gamma,
            steps,
        ) {
            Ok(smoothed) => smoothed,
            Err(err) => {
                warn!(error = %err, "Seasonal smoothing failed, forecasting zeros");
                vec![0.0; steps]
            }
        };

        let mut forecast = smoothed[smoothed.len().saturating_sub(steps)..].to_vec();
        forecast.resize(steps, 0.0);

        debug!(
            points = values.len(),
            steps,
            period = self.params.seasonal_period_hours,
            "Holt-Winters forecast"
        );

        let hourly: Vec<HourlyForecast> = future_hours(anchor, steps)
            .into_iter()
            .zip(forecast)
            .map(|(timestamp, value)| HourlyForecast {
                timestamp,
                value: finite_or_zero(value),
            })
            .collect();

        aggregate_daily(&hourly, horizon_days)
    }
}
