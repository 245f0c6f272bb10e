//! # Forecast Math
//!
//! Numeric building blocks for usage forecasting.
//! This crate provides the averaging helpers, least-squares trend fitting and
//! seasonal smoothing routines that the forecasting tiers are built from.

use thiserror::Error;

pub mod forecasting;
pub mod moving_averages;

pub use forecasting::{fit_linear, LinearFit, Smoother, TripleExponentialSmoothing};
pub use moving_averages::{mean_or_zero, trailing_mean};

/// Errors that can occur in forecasting math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;
