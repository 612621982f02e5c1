//! Index normalization, imputation and differencing

use crate::data::{LabeledSeries, TimeSeries};
use crate::dates::{parse_date, DateOrder};
use crate::error::{Result, SeriesError};
use crate::frequency::Frequency;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Options for `ensure_datetime_index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Reindex onto this frequency
    pub freq: Option<Frequency>,
    pub sort_index: bool,
    pub index_name: String,
    /// Field order for ambiguous numeric labels
    pub date_order: DateOrder,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            freq: None,
            sort_index: true,
            index_name: "date".to_string(),
            date_order: DateOrder::default(),
        }
    }
}

/// Anything that can be turned into a date-indexed series
pub trait DatetimeIndexSource {
    fn to_time_series(&self, order: DateOrder) -> Result<TimeSeries>;
}

impl DatetimeIndexSource for TimeSeries {
    fn to_time_series(&self, _order: DateOrder) -> Result<TimeSeries> {
        Ok(self.clone())
    }
}

impl DatetimeIndexSource for LabeledSeries {
    /// Blank labels become missing timestamps; any other label that is not
    /// a date is an error.
    fn to_time_series(&self, order: DateOrder) -> Result<TimeSeries> {
        let index = self
            .labels()
            .iter()
            .map(|label| {
                if label.trim().is_empty() {
                    return Ok(None);
                }
                parse_date(label, order)
                    .map(Some)
                    .ok_or_else(|| SeriesError::DateParse(format!("Unknown date label: {:?}", label)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut series = TimeSeries::new(index, self.values().to_vec())?;
        series.set_name(self.name().map(str::to_string));
        Ok(series)
    }
}

/// Return a date-indexed copy of `series`, sorted, named and reindexed as asked
pub fn ensure_datetime_index<S>(series: &S, options: &IndexOptions) -> Result<TimeSeries>
where
    S: DatetimeIndexSource + ?Sized,
{
    let mut out = series.to_time_series(options.date_order)?;
    if options.sort_index {
        out = out.sort_index();
    }
    out.set_index_name(Some(options.index_name.clone()));

    if let Some(freq) = options.freq {
        out = out.asfreq(freq)?;
    }
    Ok(out)
}

/// Imputation strategy for `fill_missing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMethod {
    /// Carry the last observed value forward
    Ffill,
    /// Carry the next observed value backward
    Bfill,
    Mean,
    Median,
    Zero,
    /// A caller-supplied constant
    Value,
}

impl FromStr for FillMethod {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ffill" => Ok(FillMethod::Ffill),
            "bfill" => Ok(FillMethod::Bfill),
            "mean" => Ok(FillMethod::Mean),
            "median" => Ok(FillMethod::Median),
            "zero" => Ok(FillMethod::Zero),
            "value" => Ok(FillMethod::Value),
            _ => Err(SeriesError::UnsupportedMethod(format!(
                "Unsupported fill method: {}. Use one of ffill, bfill, mean, median, zero, value",
                s
            ))),
        }
    }
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FillMethod::Ffill => "ffill",
            FillMethod::Bfill => "bfill",
            FillMethod::Mean => "mean",
            FillMethod::Median => "median",
            FillMethod::Zero => "zero",
            FillMethod::Value => "value",
        };
        f.write_str(name)
    }
}

fn fill_constant(values: &[Option<f64>], constant: f64) -> Vec<Option<f64>> {
    values.iter().map(|v| v.or(Some(constant))).collect()
}

fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

fn backward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut reversed: Vec<Option<f64>> = values.iter().rev().copied().collect();
    reversed = forward_fill(&reversed);
    reversed.reverse();
    reversed
}

/// Replace missing values using `method`
///
/// `FillMethod::Value` needs `value`. Mean and median leave the series
/// unchanged when nothing is observed.
pub fn fill_missing(series: &TimeSeries, method: FillMethod, value: Option<f64>) -> Result<TimeSeries> {
    let values = series.values();
    let observed = series.observed_values();

    let filled = match method {
        FillMethod::Ffill => forward_fill(values),
        FillMethod::Bfill => backward_fill(values),
        FillMethod::Zero => fill_constant(values, 0.0),
        FillMethod::Value => {
            let constant = value.ok_or_else(|| {
                SeriesError::MissingConfiguration(
                    "A fill value must be provided when method is 'value'".to_string(),
                )
            })?;
            fill_constant(values, constant)
        }
        FillMethod::Mean if observed.is_empty() => values.to_vec(),
        FillMethod::Mean => fill_constant(values, observed.iter().mean()),
        FillMethod::Median if observed.is_empty() => values.to_vec(),
        FillMethod::Median => fill_constant(values, Data::new(observed).median()),
    };

    debug!(%method, missing_before = series.missing_count(), "filled missing values");
    // A NaN constant still means missing
    let filled = filled
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(series.with_values(filled))
}

/// Apply `order` rounds of first differencing
///
/// Each round leaves its first entry missing, and any difference touching a
/// missing value is missing. With `dropna` every missing entry is removed
/// afterwards, not only the leading ones.
pub fn difference_series(series: &TimeSeries, order: usize, dropna: bool) -> TimeSeries {
    let mut values = series.values().to_vec();
    for _ in 0..order {
        let mut next = Vec::with_capacity(values.len());
        next.extend(values.first().map(|_| None));
        next.extend(values.windows(2).map(|w| Some(w[1]? - w[0]?)));
        values = next;
    }

    let diffed = series.with_values(values);
    if dropna {
        diffed.drop_missing_values()
    } else {
        diffed
    }
}
