//! Error types for the series_prep crate

use polars::prelude::PolarsError;
use series_math::MathError;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for the series_prep crate
#[derive(Debug, Error)]
pub enum SeriesError {
    /// The input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A required option was not supplied
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A column selector did not match any column of the table
    #[error("Column not found: {column}. Available columns: {available:?}")]
    ColumnNotFound {
        /// The selector that failed, e.g. `position 5` or `'users'`
        column: String,
        /// Columns present in the table
        available: Vec<String>,
    },

    /// Unknown strategy name
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Values outside the domain of a transform
    #[error("Domain violation: {0}")]
    DomainViolation(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Data that cannot be processed as requested
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A label that cannot be read as a date
    #[error("Date parse error: {0}")]
    DateParse(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from writing CSV output
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from reading JSON configuration
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from the numerical core
    #[error("Math error: {0}")]
    MathError(#[from] MathError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, SeriesError>;

impl From<PolarsError> for SeriesError {
    fn from(err: PolarsError) -> Self {
        SeriesError::PolarsError(err.to_string())
    }
}
