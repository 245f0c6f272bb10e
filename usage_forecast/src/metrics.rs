//! Metrics for evaluating forecast accuracy against observed readings

use crate::data::HistoricalSeries;
use crate::error::{ForecastError, Result};
use crate::models::DailyPrediction;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over days with a non-zero actual
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
    /// Days that had both a prediction and observed readings
    pub matched_days: usize,
}

/// Compare daily predictions with what was actually observed.
///
/// Each prediction is matched with the mean magnitude of the readings on its
/// date; days without readings are left out.
pub fn evaluate_forecast(
    predictions: &[DailyPrediction],
    actual: &HistoricalSeries,
) -> Result<ForecastAccuracy> {
    let (forecast, observed): (Vec<f64>, Vec<f64>) = predictions
        .iter()
        .filter_map(|p| {
            actual
                .mean_abs_between(p.date, p.date)
                .map(|observed| (p.value, observed))
        })
        .unzip();

    if forecast.is_empty() {
        return Err(ForecastError::ValidationError(
            "No predicted date has observed readings".to_string(),
        ));
    }

    forecast_accuracy(&forecast, &observed)
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::ValidationError(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).mean();
    let mse = errors.iter().map(|e| e.powi(2)).mean();
    let rmse = mse.sqrt();

    let percentage_errors: Vec<f64> = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
        .collect();
    let mape = if percentage_errors.is_empty() {
        0.0
    } else {
        percentage_errors.iter().mean()
    };

    let smape = actual
        .iter()
        .zip(forecast.iter())
        .map(|(&a, &f)| {
            let denominator = a.abs() + f.abs();
            if denominator == 0.0 {
                0.0
            } else {
                200.0 * (a - f).abs() / denominator
            }
        })
        .mean();

    Ok(ForecastAccuracy {
        mae,
        mse,
        rmse,
        mape,
        smape,
        matched_days: forecast.len(),
    })
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy ({} days):", self.matched_days)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}
