//! Forecast orchestration
//!
//! [`Forecaster`] wires availability assessment, tier selection and the tier
//! algorithms into one call. It holds nothing but its configuration, so one
//! instance can serve any number of concurrent requests.

use crate::availability::{assess_availability_with, DataAvailability};
use crate::config::EngineConfig;
use crate::data::{parse_date, HistoricalSeries, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use crate::models::{
    DailyPrediction, ForecastAlgorithm, HoltWintersForecast, MovingAverageForecast,
    SeasonalWeightedForecast, TrendForecast,
};
use crate::source::SeriesSource;
use crate::tier::{select_tier, Tier, TierDescriptor};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Predictions together with the tier that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predictions: Vec<DailyPrediction>,
    pub metadata: ForecastMetadata,
}

/// Confidence signal reported with every forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMetadata {
    pub tier: Tier,
    pub display_name: String,
    pub confidence: u8,
    pub accuracy_stars: Option<u8>,
    pub warning: Option<String>,
    pub data_availability: DataAvailability,
}

impl ForecastMetadata {
    fn new(descriptor: TierDescriptor, data_availability: DataAvailability) -> Self {
        Self {
            tier: descriptor.tier,
            display_name: descriptor.display_name,
            confidence: descriptor.confidence,
            accuracy_stars: descriptor.accuracy_stars,
            warning: descriptor.warning,
            data_availability,
        }
    }
}

/// Totals over the predicted days
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub total: f64,
    pub peak: f64,
    pub average_per_day: f64,
    pub days: usize,
}

impl ForecastResult {
    /// Whether a forecast was produced at all
    pub fn is_insufficient(&self) -> bool {
        self.metadata.tier == Tier::InsufficientData
    }

    /// Serialize to the JSON shape the dashboard consumes
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Sum, peak and daily average of the predictions
    pub fn summary(&self) -> ForecastSummary {
        let values: Vec<f64> = self.predictions.iter().map(|p| p.value).collect();
        let total: f64 = values.iter().sum();
        let peak = values.iter().copied().fold(0.0, f64::max);

        ForecastSummary {
            total,
            peak,
            average_per_day: forecast_math::mean_or_zero(&values),
            days: values.len(),
        }
    }
}

/// Adaptive multi-tier forecaster
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    config: EngineConfig,
}

impl Forecaster {
    /// Create a forecaster from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Algorithm serving `tier`; the insufficient-data tier has none
    pub fn algorithm(&self, tier: Tier) -> Option<Box<dyn ForecastAlgorithm>> {
        match tier {
            Tier::HoltWinters => Some(Box::new(HoltWintersForecast::new(
                self.config.smoothing.clone(),
            ))),
            Tier::SeasonalWeighted => Some(Box::new(SeasonalWeightedForecast::new(
                self.config.seasonal.clone(),
            ))),
            Tier::TrendBased => Some(Box::new(TrendForecast::new(self.config.trend.window_days))),
            Tier::MovingAverage => Some(Box::new(MovingAverageForecast::new(
                self.config.moving_average.window_days,
            ))),
            Tier::InsufficientData => None,
        }
    }

    /// Forecast `horizon_days` days after `anchor` from `series`.
    ///
    /// Never fails: sparse history yields the insufficient-data tier with an
    /// empty prediction list. `anchor` is expected to lie within the years
    /// [`parse_date`] accepts.
    pub fn generate_forecast(
        &self,
        anchor: NaiveDate,
        horizon_days: usize,
        series: &HistoricalSeries,
    ) -> ForecastResult {
        let availability =
            assess_availability_with(anchor, series, horizon_days, &self.config.availability);
        let descriptor = select_tier(&availability);

        let predictions = match self.algorithm(descriptor.tier) {
            Some(algorithm) => algorithm.predict(series, horizon_days, anchor),
            None => Vec::new(),
        };

        info!(
            tier = %descriptor.tier,
            confidence = descriptor.confidence,
            %anchor,
            horizon_days,
            predictions = predictions.len(),
            "Generated forecast"
        );

        ForecastResult {
            predictions,
            metadata: ForecastMetadata::new(descriptor, availability),
        }
    }

    /// Forecast from wire points and an anchor date string
    pub fn forecast_points(
        &self,
        anchor: &str,
        horizon_days: usize,
        points: &[TimeSeriesPoint],
    ) -> Result<ForecastResult> {
        let anchor = parse_date(anchor)?;
        let series = HistoricalSeries::from_points(points);
        Ok(self.generate_forecast(anchor, horizon_days, &series))
    }

    /// Fetch the lookback window ending at `anchor` and forecast from it
    pub fn forecast_from_source(
        &self,
        source: &dyn SeriesSource,
        anchor: NaiveDate,
        horizon_days: usize,
    ) -> Result<ForecastResult> {
        let start = anchor
            .checked_sub_days(Days::new(u64::from(self.config.lookback_days)))
            .ok_or_else(|| {
                ForecastError::InvalidDate(format!("{} minus the lookback window", anchor))
            })?;
        let series = source.fetch(start, anchor)?;
        Ok(self.generate_forecast(anchor, horizon_days, &series))
    }
}

/// Forecast with the stock configuration
pub fn generate_forecast(
    anchor: NaiveDate,
    horizon_days: usize,
    series: &HistoricalSeries,
) -> ForecastResult {
    Forecaster::default().generate_forecast(anchor, horizon_days, series)
}
