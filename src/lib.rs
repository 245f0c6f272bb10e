//! # Ecosphere
//!
//! Umbrella crate for the building-analytics forecasting workspace.
//!
//! - [`usage_forecast`]: availability assessment, tier selection and the
//!   tiered forecasting algorithms
//! - [`forecast_math`]: numeric building blocks (linear fit, Holt-Winters
//!   smoothing, trailing means)
//!
//! ## Example
//!
//! ```
//! use ecosphere::usage_forecast::{generate_forecast, HistoricalSeries, Tier};
//!
//! let anchor = "2025-12-30".parse().unwrap();
//! let result = generate_forecast(anchor, 7, &HistoricalSeries::new());
//!
//! assert_eq!(result.metadata.tier, Tier::InsufficientData);
//! assert!(result.predictions.is_empty());
//! ```

pub use forecast_math;
pub use usage_forecast;

pub use usage_forecast::{
    generate_forecast, EngineConfig, ForecastError, ForecastResult, Forecaster, HistoricalSeries,
    Tier,
};
