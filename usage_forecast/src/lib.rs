//! # Usage Forecast
//!
//! Adaptive multi-tier forecasting of building utility readings
//! (electricity, water, gas, indoor temperature).
//!
//! ## Features
//!
//! - Gap analysis and availability assessment of hourly histories
//! - Tier selection by how much history is available
//! - Four forecasting algorithms (Holt-Winters, Seasonal Weighted, Trend, Moving Average)
//! - A confidence / accuracy signal attached to every forecast
//! - CSV and JSON loading, accuracy evaluation against observed readings
//!
//! ## Tiers
//!
//! | Tier                | Needs                                   | Confidence |
//! |---------------------|-----------------------------------------|------------|
//! | `HOLT_WINTERS`      | two years of hourly points, 80% complete | 95         |
//! | `SEASONAL_WEIGHTED` | last year's window and the last 30 days | 80         |
//! | `TREND_BASED`       | the last 30 days                        | 65         |
//! | `MOVING_AVERAGE`    | the last 7 days                         | 50         |
//! | `INSUFFICIENT_DATA` | anything less                           | 0          |
//!
//! ## Quick Start
//!
//! ```rust
//! use usage_forecast::{Forecaster, TimeSeriesPoint};
//!
//! let points: Vec<TimeSeriesPoint> = (0..10 * 24)
//!     .map(|h| {
//!         let day = 21 + h / 24;
//!         TimeSeriesPoint::new(format!("2025-12-{:02}T{:02}:00:00", day, h % 24), 4.2)
//!     })
//!     .collect();
//!
//! let forecaster = Forecaster::default();
//! let result = forecaster.forecast_points("2025-12-30", 5, &points)?;
//!
//! assert_eq!(result.metadata.tier.as_str(), "MOVING_AVERAGE");
//! assert_eq!(result.predictions.len(), 5);
//! # Ok::<(), usage_forecast::ForecastError>(())
//! ```

pub mod aggregate;
pub mod availability;
pub mod config;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod metrics;
pub mod models;
pub mod source;
pub mod tier;
pub mod utils;

// Re-export commonly used types
pub use crate::availability::{assess_availability, DataAvailability, MissingPeriod};
pub use crate::config::EngineConfig;
pub use crate::data::{DataLoader, HistoricalSeries, Observation, TimeSeriesPoint};
pub use crate::error::{ForecastError, Result};
pub use crate::forecaster::{generate_forecast, ForecastResult, ForecastSummary, Forecaster};
pub use crate::models::{DailyPrediction, ForecastAlgorithm};
pub use crate::source::{InMemorySource, SeriesSource};
pub use crate::tier::{select_tier, Tier, TierDescriptor};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
