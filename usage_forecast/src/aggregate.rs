//! Collapse hourly forecasts into daily predictions

use crate::models::DailyPrediction;
use crate::utils::HOURS_PER_DAY;
use chrono::NaiveDateTime;

/// One hourly forecast value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyForecast {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Average consecutive 24-point blocks into one prediction per day.
///
/// Each prediction is dated by the first point of its block. At most
/// `horizon_days` predictions are produced; a trailing partial block is
/// averaged over the points it has.
pub fn aggregate_daily(hourly: &[HourlyForecast], horizon_days: usize) -> Vec<DailyPrediction> {
    hourly
        .chunks(HOURS_PER_DAY)
        .take(horizon_days)
        .map(|block| {
            let values: Vec<f64> = block.iter().map(|h| h.value).collect();
            DailyPrediction::new(block[0].timestamp.date(), forecast_math::mean_or_zero(&values))
        })
        .collect()
}
