//! # Series Prep
//!
//! Loading, cleaning, transforming and testing a univariate time series.
//!
//! ## Features
//!
//! - CSV loading into a date-indexed series with explicit missing values
//! - Datetime index normalization and reindexing onto a fixed frequency
//! - Missing-value imputation (forward/backward fill, mean, median, constants)
//! - Differencing of any order
//! - Augmented Dickey-Fuller stationarity test with MacKinnon p-values
//! - Box-Cox transform with maximum-likelihood lambda, and its inverse
//! - Classical seasonal decomposition and ACF/PACF estimates
//!
//! ## Quick Start
//!
//! ```no_run
//! use series_prep::{
//!     adfuller_test, difference_series, fill_missing, load_timeseries, AutoLag, FillMethod,
//!     LoadOptions,
//! };
//!
//! # fn main() -> series_prep::Result<()> {
//! let series = load_timeseries("active_users.csv", 0usize, "users", &LoadOptions::default())?;
//! let series = fill_missing(&series, FillMethod::Ffill, None)?;
//!
//! let result = adfuller_test(&series, 0.05, Some(AutoLag::Aic), false)?;
//! if !result.is_stationary {
//!     let diffed = difference_series(&series, 1, true);
//!     adfuller_test(&diffed, 0.05, Some(AutoLag::Aic), true)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod data;
pub mod dates;
pub mod error;
pub mod frequency;
pub mod loader;
pub mod prep;
pub mod stationarity;
pub mod transform;

// Re-export commonly used types
pub use crate::analysis::{acf, pacf, seasonal_decompose, Correlogram, Decomposition};
pub use crate::data::{LabeledSeries, TimeSeries};
pub use crate::dates::DateOrder;
pub use crate::error::{Result, SeriesError};
pub use crate::frequency::Frequency;
pub use crate::loader::{load_timeseries, ColumnSelector, LoadOptions};
pub use crate::prep::{
    difference_series, ensure_datetime_index, fill_missing, DatetimeIndexSource, FillMethod,
    IndexOptions,
};
pub use crate::stationarity::{adfuller_test, adfuller_test_with, AdfOptions, AdfResult, CriticalValues};
pub use crate::transform::{boxcox_transform, inv_boxcox};
pub use series_math::decomposition::DecompositionModel;
pub use series_math::unit_root::{AutoLag, Regression};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
