//! Error types for the series_plot crate

use plotters::drawing::DrawingAreaErrorKind;
use series_math::MathError;
use series_prep::SeriesError;
use thiserror::Error;

/// Errors raised while preparing or drawing a chart
#[derive(Debug, Error)]
pub enum PlotError {
    /// The series could not be prepared for plotting
    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    /// Error from the numerical core
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// No observed point to draw
    #[error("Nothing to plot: {0}")]
    EmptySeries(String),

    /// Error from the drawing backend
    #[error("Drawing error: {0}")]
    Drawing(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, PlotError>;

impl<E: std::error::Error + Send + Sync + 'static> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(format!("Plot drawing error: {}", err))
    }
}
