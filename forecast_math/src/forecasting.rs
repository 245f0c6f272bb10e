//! Forecasting primitives for time series prediction
//!
//! Contains:
//! - Ordinary least-squares trend fitting
//! - The [`Smoother`] interface for seasonal smoothing
//! - Triple exponential smoothing (additive Holt-Winters)

use crate::moving_averages::mean_or_zero;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Straight line fitted by ordinary least squares, `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit a line through `values`, using each value's index as its x coordinate.
///
/// Degenerate input never fails: fewer than two points, or x values without
/// spread, yield a flat line through the mean.
pub fn fit_linear(values: &[f64]) -> LinearFit {
    let flat = LinearFit {
        slope: 0.0,
        intercept: mean_or_zero(values),
    };
    if values.len() < 2 {
        return flat;
    }

    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        numerator += (x - x_mean) * (y - y_mean);
        denominator += (x - x_mean) * (x - x_mean);
    }

    if denominator.abs() < 1e-10 {
        return flat;
    }

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;

    if !slope.is_finite() || !intercept.is_finite() {
        return flat;
    }

    LinearFit { slope, intercept }
}

/// Seasonal smoothing routine.
///
/// Implementations return the smoothed input followed by `forecast_steps`
/// extrapolated values, so the output length is `series.len() + forecast_steps`.
pub trait Smoother: std::fmt::Debug + Send + Sync {
    fn smooth(
        &self,
        series: &[f64],
        period: usize,
        alpha: f64,
        beta: f64,
        gamma: f64,
        forecast_steps: usize,
    ) -> Result<Vec<f64>>;
}

/// Additive triple exponential smoothing (Holt-Winters).
///
/// - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(y_t - l_t) + (1-γ)s_{t-m}`
/// - Forecast: `ŷ_{t+h} = l_t + h*b_t + s_{t+h-m}`
#[derive(Debug, Clone, Copy, Default)]
pub struct TripleExponentialSmoothing;

impl TripleExponentialSmoothing {
    pub fn new() -> Self {
        Self
    }

    fn check_coefficient(name: &str, value: f64) -> Result<()> {
        if value <= 0.0 || value >= 1.0 || !value.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "{} must be between 0 and 1 (exclusive), got {}",
                name, value
            )));
        }
        Ok(())
    }

    /// Initial level, trend and seasonal indices.
    ///
    /// Needs one full season for the seasonal indices and two for the trend;
    /// whatever is missing starts at zero.
    fn initialize_state(values: &[f64], period: usize) -> (f64, f64, Vec<f64>) {
        let season_len = period.min(values.len());
        let first_season = &values[..season_len];
        let level = mean_or_zero(first_season);

        let trend = if values.len() >= 2 * period {
            let sum: f64 = (0..period)
                .map(|i| (values[period + i] - values[i]) / period as f64)
                .sum();
            sum / period as f64
        } else {
            0.0
        };

        let mut seasonals = vec![0.0; period];
        for (slot, y) in seasonals.iter_mut().zip(first_season) {
            *slot = y - level;
        }

        (level, trend, seasonals)
    }
}

impl Smoother for TripleExponentialSmoothing {
    fn smooth(
        &self,
        series: &[f64],
        period: usize,
        alpha: f64,
        beta: f64,
        gamma: f64,
        forecast_steps: usize,
    ) -> Result<Vec<f64>> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Seasonal period must be greater than zero".to_string(),
            ));
        }
        Self::check_coefficient("Alpha", alpha)?;
        Self::check_coefficient("Beta", beta)?;
        Self::check_coefficient("Gamma", gamma)?;

        if series.is_empty() {
            return Ok(vec![0.0; forecast_steps]);
        }

        let n = series.len();
        let (mut level, mut trend, mut seasonals) = Self::initialize_state(series, period);
        let mut output = Vec::with_capacity(n + forecast_steps);

        for (t, &y) in series.iter().enumerate() {
            let idx = t % period;
            let seasonal = seasonals[idx];

            // One-step-ahead fitted value
            output.push(level + trend + seasonal);

            let new_level = alpha * (y - seasonal) + (1.0 - alpha) * (level + trend);
            let new_trend = beta * (new_level - level) + (1.0 - beta) * trend;
            seasonals[idx] = gamma * (y - new_level) + (1.0 - gamma) * seasonal;

            level = new_level;
            trend = new_trend;
        }

        for h in 1..=forecast_steps {
            let seasonal = seasonals[(n + h - 1) % period];
            output.push(level + h as f64 * trend + seasonal);
        }

        for value in output.iter_mut() {
            if !value.is_finite() {
                *value = 0.0;
            }
        }

        Ok(output)
    }
}
