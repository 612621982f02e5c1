//! Shared drawing helpers: the time axis and line panels

use crate::error::{PlotError, Result};
use chrono::{Duration, NaiveDateTime};
use plotters::coord::Shift;
use plotters::prelude::*;
use series_prep::TimeSeries;
use std::ops::Range;

pub(crate) type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// matplotlib's default cycle
pub(crate) const PALETTE: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Maps timestamps to days since the earliest point and back to labels
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimeAxis {
    origin: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeAxis {
    pub fn covering(series: &TimeSeries) -> Result<Self> {
        let stamps = series.index().iter().flatten();
        match (stamps.clone().min(), stamps.max()) {
            (Some(origin), Some(end)) => Ok(Self {
                origin: *origin,
                end: *end,
            }),
            _ => Err(PlotError::EmptySeries(
                "the series has no valid timestamp".to_string(),
            )),
        }
    }

    pub fn position(&self, t: NaiveDateTime) -> f64 {
        (t - self.origin).num_seconds() as f64 / SECONDS_PER_DAY
    }

    pub fn range(&self) -> Range<f64> {
        let span = self.position(self.end);
        if span <= 0.0 {
            -0.5..0.5
        } else {
            0.0..span
        }
    }

    pub fn label(&self, x: f64) -> String {
        let t = self.origin + Duration::seconds((x * SECONDS_PER_DAY).round() as i64);
        if self.position(self.end) < 2.0 {
            t.format("%m-%d %H:%M").to_string()
        } else {
            t.format("%Y-%m-%d").to_string()
        }
    }

    /// Runs of consecutive present points; a missing value breaks the line
    pub fn segments(&self, series: &TimeSeries) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (t, v) in series.iter() {
            match (t, v) {
                (Some(t), Some(v)) if v.is_finite() => current.push((self.position(t), v)),
                (Some(_), _) => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
                (None, _) => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Bounds of the values with a 5% margin
pub(crate) fn value_range<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return -1.0..1.0;
    }
    if hi - lo < f64::EPSILON {
        return lo - 1.0..hi + 1.0;
    }
    let margin = (hi - lo) * 0.05;
    lo - margin..hi + margin
}

/// One line of a panel
pub(crate) struct Line<'s> {
    pub label: Option<String>,
    pub series: &'s TimeSeries,
    pub color: RGBColor,
}

/// Settings shared by the line panels
pub(crate) struct Panel<'t> {
    pub caption: &'t str,
    pub xlabel: Option<&'t str>,
    pub ylabel: Option<&'t str>,
    pub grid: bool,
    pub caption_size: u32,
}

/// Draw `lines` on one time axis; adds a legend when any line is labelled
pub(crate) fn draw_lines(
    area: &Canvas<'_>,
    axis: &TimeAxis,
    panel: &Panel<'_>,
    lines: &[Line<'_>],
) -> Result<()> {
    let y_range = value_range(
        lines
            .iter()
            .flat_map(|line| line.series.values().iter().flatten().copied()),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(panel.caption, ("sans-serif", panel.caption_size).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(axis.range(), y_range)?;

    let formatter = |x: &f64| axis.label(*x);
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(8).x_label_formatter(&formatter);
    if let Some(xlabel) = panel.xlabel {
        mesh.x_desc(xlabel);
    }
    if let Some(ylabel) = panel.ylabel {
        mesh.y_desc(ylabel);
    }
    if !panel.grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let mut labelled = false;
    for line in lines {
        let color = line.color;
        for (i, segment) in axis.segments(line.series).into_iter().enumerate() {
            let drawn = if segment.len() == 1 {
                chart.draw_series(std::iter::once(Circle::new(segment[0], 2, color.filled())))?
            } else {
                chart.draw_series(LineSeries::new(segment, color.stroke_width(2)))?
            };
            if let (0, Some(label)) = (i, &line.label) {
                labelled = true;
                drawn.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}
