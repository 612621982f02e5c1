//! Date-indexed series with missing values

use crate::error::{Result, SeriesError};
use crate::frequency::Frequency;
use chrono::NaiveDateTime;
use series_math::rolling;
use statrs::statistics::{Data, Median, Statistics};
use std::collections::HashMap;
use std::path::Path;

/// Ordered sequence of (timestamp, value) pairs
///
/// Either side of a pair may be missing: a missing timestamp marks a label
/// that could not be read as a date, a missing value an absent or
/// non-numeric observation. Missing is never the same as zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    index: Vec<Option<NaiveDateTime>>,
    values: Vec<Option<f64>>,
    name: Option<String>,
    index_name: Option<String>,
    freq: Option<Frequency>,
}

impl TimeSeries {
    /// Create a series from parallel index and value vectors
    ///
    /// `NaN` values are stored as missing.
    pub fn new(index: Vec<Option<NaiveDateTime>>, values: Vec<Option<f64>>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(SeriesError::InvalidData(format!(
                "Index has {} entries but there are {} values",
                index.len(),
                values.len()
            )));
        }

        Ok(Self {
            index,
            values: values
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect(),
            name: None,
            index_name: None,
            freq: None,
        })
    }

    /// Create a fully observed series
    pub fn from_values(index: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self> {
        Self::new(
            index.into_iter().map(Some).collect(),
            values.into_iter().map(Some).collect(),
        )
    }

    /// Create a series from (timestamp, value) pairs
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDateTime, f64)>,
    {
        let (index, values): (Vec<_>, Vec<_>) = observations
            .into_iter()
            .map(|(t, v)| (Some(t), Some(v).filter(|x| !x.is_nan())))
            .unzip();

        Self {
            index,
            values,
            ..Self::default()
        }
    }

    /// Set the series name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the index name
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn set_index_name(&mut self, index_name: Option<String>) {
        self.index_name = index_name;
    }

    /// Copy of this series carrying new values, same index and metadata
    pub(crate) fn with_values(&self, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(values.len(), self.index.len());
        Self {
            index: self.index.clone(),
            values,
            name: self.name.clone(),
            index_name: self.index_name.clone(),
            freq: self.freq,
        }
    }

    fn select(&self, rows: &[usize]) -> Self {
        Self {
            index: rows.iter().map(|&i| self.index[i]).collect(),
            values: rows.iter().map(|&i| self.values[i]).collect(),
            name: self.name.clone(),
            index_name: self.index_name.clone(),
            freq: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Fixed frequency, set when the series was reindexed onto a grid
    pub fn freq(&self) -> Option<Frequency> {
        self.freq
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index(&self) -> &[Option<NaiveDateTime>] {
        &self.index
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Iterate over (timestamp, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (Option<NaiveDateTime>, Option<f64>)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }

    /// Pairs where both timestamp and value are present
    pub fn observed(&self) -> Vec<(NaiveDateTime, f64)> {
        self.iter()
            .filter_map(|(t, v)| Some((t?, v?)))
            .collect()
    }

    /// Present values in order, ignoring the index
    pub fn observed_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Number of missing values
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Drop rows whose timestamp or value is missing
    pub fn dropna(&self) -> Self {
        let rows: Vec<usize> = (0..self.len())
            .filter(|&i| self.index[i].is_some() && self.values[i].is_some())
            .collect();
        if rows.len() == self.len() {
            return self.clone();
        }
        self.select(&rows)
    }

    /// Drop rows whose value is missing, keeping rows with a missing timestamp
    pub(crate) fn drop_missing_values(&self) -> Self {
        let rows: Vec<usize> = (0..self.len())
            .filter(|&i| self.values[i].is_some())
            .collect();
        if rows.len() == self.len() {
            return self.clone();
        }
        self.select(&rows)
    }

    /// Stable sort by timestamp, missing timestamps last
    pub fn sort_index(&self) -> Self {
        let mut rows: Vec<usize> = (0..self.len()).collect();
        rows.sort_by_key(|&i| (self.index[i].is_none(), self.index[i]));

        let mut sorted = self.select(&rows);
        sorted.freq = self.freq;
        sorted
    }

    /// Whether the present timestamps are strictly increasing
    pub fn is_strictly_increasing(&self) -> bool {
        let stamps: Vec<NaiveDateTime> = self.index.iter().flatten().copied().collect();
        stamps.windows(2).all(|w| w[0] < w[1])
    }

    /// Reindex onto a fixed frequency between the first and last timestamp
    ///
    /// Grid points without an observation become missing. Rows with a
    /// missing timestamp and observations off the grid are dropped.
    pub fn asfreq(&self, freq: Frequency) -> Result<Self> {
        let mut lookup: HashMap<NaiveDateTime, Option<f64>> = HashMap::with_capacity(self.len());
        for (t, v) in self.iter() {
            if let Some(t) = t {
                if lookup.insert(t, v).is_some() {
                    return Err(SeriesError::InvalidData(format!(
                        "Cannot reindex to frequency {}: duplicate timestamp {}",
                        freq, t
                    )));
                }
            }
        }

        let start = lookup.keys().min().copied();
        let end = lookup.keys().max().copied();
        let grid = match (start, end) {
            (Some(start), Some(end)) => freq.range(start, end),
            _ => Vec::new(),
        };

        let values = grid
            .iter()
            .map(|t| lookup.get(t).copied().flatten())
            .collect();

        Ok(Self {
            index: grid.into_iter().map(Some).collect(),
            values,
            name: self.name.clone(),
            index_name: self.index_name.clone(),
            freq: Some(freq),
        })
    }

    /// Mean of the present values
    pub fn mean(&self) -> Option<f64> {
        let observed = self.observed_values();
        if observed.is_empty() {
            return None;
        }
        Some(observed.iter().mean())
    }

    /// Median of the present values
    pub fn median(&self) -> Option<f64> {
        let observed = self.observed_values();
        if observed.is_empty() {
            return None;
        }
        Some(Data::new(observed).median())
    }

    /// Rolling mean over `window` consecutive entries
    pub fn rolling_mean(&self, window: usize) -> Result<Self> {
        Ok(self.with_values(rolling::rolling_mean(&self.values, window)?))
    }

    /// Rolling sample standard deviation over `window` consecutive entries
    pub fn rolling_std(&self, window: usize) -> Result<Self> {
        Ok(self.with_values(rolling::rolling_std(&self.values, window)?))
    }

    /// Write `index,value` rows to a CSV file; missing entries are blank
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            self.index_name().unwrap_or("index"),
            self.name().unwrap_or("value"),
        ])?;

        for (t, v) in self.iter() {
            let stamp = t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string());
            let value = v.map(|v| v.to_string());
            writer.write_record([
                stamp.as_deref().unwrap_or(""),
                value.as_deref().unwrap_or(""),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Series whose index is still raw text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabeledSeries {
    labels: Vec<String>,
    values: Vec<Option<f64>>,
    name: Option<String>,
}

impl LabeledSeries {
    pub fn new<S: Into<String>>(labels: Vec<S>, values: Vec<Option<f64>>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(SeriesError::InvalidData(format!(
                "Got {} labels for {} values",
                labels.len(),
                values.len()
            )));
        }

        Ok(Self {
            labels: labels.into_iter().map(Into::into).collect(),
            values: values
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect(),
            name: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
