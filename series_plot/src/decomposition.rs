//! Four stacked panels of a seasonal decomposition

use crate::canvas::{draw_lines, Line, Panel, TimeAxis, PALETTE};
use crate::error::Result;
use crate::options::DecompositionPlotOptions;
use crate::series::ensure_observed;
use plotters::prelude::*;
use series_prep::{seasonal_decompose, TimeSeries};
use std::path::Path;
use tracing::debug;

/// Decompose `series` and plot observed, trend, seasonal and residual parts
pub fn plot_decomposition<P: AsRef<Path>>(
    series: &TimeSeries,
    options: &DecompositionPlotOptions,
    path: P,
) -> Result<()> {
    ensure_observed(series)?;
    let parts = seasonal_decompose(series, options.model, options.period)?;

    let path = path.as_ref();
    let axis = TimeAxis::covering(&parts.observed)?;
    let root = SVGBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE)?;

    let observed_caption = parts.observed.name().unwrap_or("observed").to_string();
    let panels = [
        (observed_caption.as_str(), &parts.observed),
        ("Trend", &parts.trend),
        ("Seasonal", &parts.seasonal),
        ("Resid", &parts.residual),
    ];

    for (area, (caption, component)) in root.split_evenly((4, 1)).iter().zip(panels) {
        draw_lines(
            area,
            &axis,
            &Panel {
                caption,
                xlabel: None,
                ylabel: None,
                grid: true,
                caption_size: 18,
            },
            &[Line {
                label: None,
                series: component,
                color: PALETTE[0],
            }],
        )?;
    }

    root.present()?;
    debug!(
        path = %path.display(),
        period = parts.period,
        model = %parts.model,
        "rendered decomposition chart"
    );
    Ok(())
}
