//! ACF and PACF stem plots side by side

use crate::canvas::{Canvas, PALETTE};
use crate::error::Result;
use crate::options::CorrelationPlotOptions;
use crate::series::ensure_observed;
use plotters::prelude::*;
use series_prep::{acf, pacf, Correlogram, TimeSeries};
use std::path::Path;
use tracing::debug;

fn draw_correlogram(area: &Canvas<'_>, caption: &str, correlogram: &Correlogram) -> Result<()> {
    let nlags = correlogram.nlags();
    let color = PALETTE[0];

    let lowest = correlogram
        .values
        .iter()
        .copied()
        .chain(correlogram.confidence.iter().map(|w| -w))
        .filter(|v| v.is_finite())
        .fold(-0.1_f64, f64::min);

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..nlags as f64 + 0.5, (lowest - 0.05)..1.1)?;

    chart
        .configure_mesh()
        .x_desc("Lag")
        .x_label_formatter(&|x: &f64| format!("{:.0}", x))
        .draw()?;

    // band around zero, skipping lag 0 where it has no width
    let band: Vec<(f64, f64)> = (1..=nlags)
        .map(|k| (k as f64, correlogram.confidence[k]))
        .chain((1..=nlags).rev().map(|k| (k as f64, -correlogram.confidence[k])))
        .collect();
    if band.len() > 2 {
        chart.draw_series(std::iter::once(Polygon::new(band, color.mix(0.2))))?;
    }

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(-0.5, 0.0), (nlags as f64 + 0.5, 0.0)],
        BLACK.stroke_width(1),
    )))?;

    chart.draw_series(correlogram.values.iter().enumerate().map(|(k, r)| {
        PathElement::new(vec![(k as f64, 0.0), (k as f64, *r)], BLACK.stroke_width(1))
    }))?;
    chart.draw_series(
        correlogram
            .values
            .iter()
            .enumerate()
            .map(|(k, r)| Circle::new((k as f64, *r), 4, color.filled())),
    )?;

    Ok(())
}

/// Plot the autocorrelation and partial autocorrelation functions
///
/// ACF lags are clamped to the number of observations minus one. PACF lags
/// must stay below half the number of observations.
pub fn plot_acf_pacf_side_by_side<P: AsRef<Path>>(
    series: &TimeSeries,
    options: &CorrelationPlotOptions,
    path: P,
) -> Result<()> {
    ensure_observed(series)?;
    let nobs = series.observed_values().len();
    let acf_lags = options.lags.min(nobs - 1);

    let autocorrelation = acf(series, acf_lags, options.alpha)?;
    let partial = pacf(series, options.lags, options.alpha)?;

    let path = path.as_ref();
    let root = SVGBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, 2));
    draw_correlogram(&panels[0], "Autocorrelation (ACF)", &autocorrelation)?;
    draw_correlogram(&panels[1], "Partial Autocorrelation (PACF)", &partial)?;

    root.present()?;
    debug!(path = %path.display(), acf_lags, pacf_lags = options.lags, "rendered correlation chart");
    Ok(())
}
