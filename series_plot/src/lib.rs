//! # Series Plot
//!
//! SVG charts for exploring a univariate time series.
//!
//! ## Charts
//!
//! - [`plot_series`]: the raw series as a line
//! - [`plot_decomposition`]: observed, trend, seasonal and residual panels
//! - [`plot_rolling_statistics`]: the series with its rolling mean and std
//! - [`plot_acf_pacf_side_by_side`]: ACF and PACF stems with confidence bands
//!
//! Missing values break lines instead of being interpolated.
//!
//! ## Example
//!
//! ```no_run
//! use series_plot::{plot_rolling_statistics, RollingPlotOptions};
//! use series_prep::{load_timeseries, LoadOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let series = load_timeseries("active_users.csv", 0usize, 1usize, &LoadOptions::default())?;
//! let options = RollingPlotOptions {
//!     window: 7,
//!     ..RollingPlotOptions::default()
//! };
//! plot_rolling_statistics(&series, &options, "rolling.svg")?;
//! # Ok(())
//! # }
//! ```

mod canvas;
pub mod correlation;
pub mod decomposition;
pub mod error;
pub mod options;
pub mod series;

pub use crate::correlation::plot_acf_pacf_side_by_side;
pub use crate::decomposition::plot_decomposition;
pub use crate::error::{PlotError, Result};
pub use crate::options::{
    CorrelationPlotOptions, DecompositionPlotOptions, RollingPlotOptions, SeriesPlotOptions,
};
pub use crate::series::{plot_rolling_statistics, plot_series};
