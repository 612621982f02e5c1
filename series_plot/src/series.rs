//! Line charts of a series and of its rolling statistics

use crate::canvas::{draw_lines, Line, Panel, TimeAxis, PALETTE};
use crate::error::{PlotError, Result};
use crate::options::{RollingPlotOptions, SeriesPlotOptions};
use plotters::prelude::*;
use series_math::rolling;
use series_prep::TimeSeries;
use std::path::Path;
use tracing::debug;

pub(crate) fn ensure_observed(series: &TimeSeries) -> Result<()> {
    if series.observed().is_empty() {
        return Err(PlotError::EmptySeries(format!(
            "series '{}' has no observed value",
            series.name().unwrap_or("series")
        )));
    }
    Ok(())
}

/// Plot the observed points of `series` as a line
pub fn plot_series<P: AsRef<Path>>(
    series: &TimeSeries,
    options: &SeriesPlotOptions,
    path: P,
) -> Result<()> {
    ensure_observed(series)?;
    let path = path.as_ref();
    let axis = TimeAxis::covering(series)?;

    let root = SVGBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE)?;

    draw_lines(
        &root,
        &axis,
        &Panel {
            caption: &options.title,
            xlabel: Some(&options.xlabel),
            ylabel: Some(&options.ylabel),
            grid: options.grid,
            caption_size: 24,
        },
        &[Line {
            label: None,
            series,
            color: PALETTE[0],
        }],
    )?;

    root.present()?;
    debug!(path = %path.display(), points = series.len(), "rendered series chart");
    Ok(())
}

/// Plot `series` with its rolling mean and rolling standard deviation
pub fn plot_rolling_statistics<P: AsRef<Path>>(
    series: &TimeSeries,
    options: &RollingPlotOptions,
    path: P,
) -> Result<()> {
    ensure_observed(series)?;
    let window = options.window;
    let rolling_mean = TimeSeries::new(
        series.index().to_vec(),
        rolling::rolling_mean(series.values(), window)?,
    )?;
    let rolling_std = TimeSeries::new(
        series.index().to_vec(),
        rolling::rolling_std(series.values(), window)?,
    )?;

    let path = path.as_ref();
    let axis = TimeAxis::covering(series)?;
    let root = SVGBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE)?;

    draw_lines(
        &root,
        &axis,
        &Panel {
            caption: &options.title,
            xlabel: Some("Time"),
            ylabel: Some("Value"),
            grid: true,
            caption_size: 24,
        },
        &[
            Line {
                label: Some("Original series".to_string()),
                series,
                color: PALETTE[0],
            },
            Line {
                label: Some(format!("Rolling mean ({})", window)),
                series: &rolling_mean,
                color: PALETTE[1],
            },
            Line {
                label: Some(format!("Rolling std ({})", window)),
                series: &rolling_std,
                color: PALETTE[2],
            },
        ],
    )?;

    root.present()?;
    debug!(path = %path.display(), window, "rendered rolling statistics chart");
    Ok(())
}
