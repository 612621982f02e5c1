//! # Series Lab
//!
//! `series_lab` bundles the time series preparation and charting crates of
//! this workspace behind one dependency.
//!
//! ## Example
//!
//! ```
//! use series_lab::prelude::*;
//! use chrono::NaiveDate;
//!
//! let index = (1..=4)
//!     .map(|d| NaiveDate::from_ymd_opt(2023, 1, d).and_then(|d| d.and_hms_opt(0, 0, 0)))
//!     .collect();
//! let series = TimeSeries::new(index, vec![Some(1.0), None, Some(4.0), Some(8.0)]).unwrap();
//!
//! let filled = fill_missing(&series, FillMethod::Ffill, None).unwrap();
//! assert_eq!(filled.values(), &[Some(1.0), Some(1.0), Some(4.0), Some(8.0)]);
//!
//! let diffed = difference_series(&filled, 1, true);
//! assert_eq!(diffed.values(), &[Some(0.0), Some(3.0), Some(4.0)]);
//! ```

pub use series_math as math;
pub use series_plot as plot;
pub use series_prep as prep;

/// The loading, preparation and plotting entry points in one import
pub mod prelude {
    pub use series_plot::{
        plot_acf_pacf_side_by_side, plot_decomposition, plot_rolling_statistics, plot_series,
        CorrelationPlotOptions, DecompositionPlotOptions, PlotError, RollingPlotOptions,
        SeriesPlotOptions,
    };
    pub use series_prep::{
        acf, adfuller_test, adfuller_test_with, boxcox_transform, difference_series,
        ensure_datetime_index, fill_missing, inv_boxcox, load_timeseries, pacf, seasonal_decompose,
        AdfOptions, AdfResult, AutoLag, ColumnSelector, DateOrder, DecompositionModel, FillMethod,
        Frequency, IndexOptions, LabeledSeries, LoadOptions, Regression, SeriesError, TimeSeries,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_reaches_every_crate() {
        let series = LabeledSeries::new(
            vec!["2023-01-01", "2023-01-02", "2023-01-03"],
            vec![Some(3.0), Some(5.0), Some(9.0)],
        )
        .unwrap();
        let series = ensure_datetime_index(&series, &IndexOptions::default()).unwrap();
        assert_eq!(series.len(), 3);

        let options = RollingPlotOptions::default();
        assert_eq!(options.window, 12);

        let model: DecompositionModel = "multiplicative".parse().unwrap();
        assert_eq!(model, DecompositionModel::Multiplicative);
    }
}
