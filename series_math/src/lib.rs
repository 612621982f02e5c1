//! # Series Math
//!
//! Numerical routines behind the series preparation helpers.
//! This crate works on plain `f64` slices and knows nothing about timestamps;
//! callers drop missing values before handing data over, except for the
//! rolling windows which understand missing points themselves.

use thiserror::Error;

pub mod boxcox;
pub mod correlation;
pub mod decomposition;
pub mod optimize;
pub mod regression;
pub mod rolling;
pub mod unit_root;

/// Errors that can occur in numerical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numerical operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Arithmetic mean, `NaN` for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (denominator `n`)
pub(crate) fn population_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}
