//! Loading a series from a delimited text file

use crate::data::TimeSeries;
use crate::dates::{parse_date, parse_with_format, DateOrder};
use crate::error::{Result, SeriesError};
use crate::frequency::Frequency;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Options for `load_timeseries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Whether the first row holds column names
    pub has_header: bool,
    /// Names for the first two columns of a headerless file
    pub column_names: Option<Vec<String>>,
    /// strftime-style format of the date column; best-effort parsing if unset
    pub date_format: Option<String>,
    /// Field order for ambiguous numeric dates in best-effort parsing
    pub date_order: DateOrder,
    /// Reindex onto this frequency after loading
    pub freq: Option<Frequency>,
    /// Drop rows whose date or value is missing
    pub dropna: bool,
    /// Sort rows by date
    pub sort_index: bool,
    /// Name given to the index
    pub index_name: String,
    /// Field separator, must be ASCII
    pub delimiter: char,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            column_names: None,
            date_format: None,
            date_order: DateOrder::default(),
            freq: None,
            dropna: true,
            sort_index: true,
            index_name: "date".to_string(),
            delimiter: ',',
        }
    }
}

impl LoadOptions {
    /// Read options from a JSON document; absent fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read options from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SeriesError::FileNotFound(path.to_path_buf()));
        }
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    fn headerless_names(&self) -> Result<&[String]> {
        match self.column_names.as_deref() {
            Some(names) if names.len() == 2 => Ok(names),
            Some(names) => Err(SeriesError::MissingConfiguration(format!(
                "column_names must hold exactly two names when has_header is false, got {}",
                names.len()
            ))),
            None => Err(SeriesError::MissingConfiguration(
                "column_names must be provided when has_header is false".to_string(),
            )),
        }
    }
}

/// A column picked by zero-based position or by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSelector {
    Position(usize),
    Name(String),
}

impl From<usize> for ColumnSelector {
    fn from(position: usize) -> Self {
        ColumnSelector::Position(position)
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::Name(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::Name(name)
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Position(i) => write!(f, "position {}", i),
            ColumnSelector::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl ColumnSelector {
    fn resolve<'a>(&self, df: &'a DataFrame) -> Result<&'a Series> {
        let found = match self {
            ColumnSelector::Position(i) => df.get_columns().get(*i),
            ColumnSelector::Name(name) => df.column(name).ok(),
        };

        found.ok_or_else(|| SeriesError::ColumnNotFound {
            column: self.to_string(),
            available: df
                .get_column_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Read every field of the file as text into a frame
///
/// Ragged rows are padded with nulls. Headerless files get `column_names`
/// for their first two columns and `column_<n>` for any others.
fn read_text_table(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    if !options.delimiter.is_ascii() {
        return Err(SeriesError::InvalidParameter(format!(
            "Delimiter must be an ASCII character, got {:?}",
            options.delimiter
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .delimiter(options.delimiter as u8)
        .flexible(true)
        .from_path(path)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    let headers: Vec<String> = if options.has_header {
        reader.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };
    let width = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let names: Vec<String> = if options.has_header {
        (0..width)
            .map(|i| {
                headers
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("column_{}", i + 1))
            })
            .collect()
    } else {
        let given = options.headerless_names()?;
        (0..width)
            .map(|i| {
                given
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("column_{}", i + 1))
            })
            .collect()
    };

    let columns: Vec<Series> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let cells: Vec<Option<String>> = rows.iter().map(|row| row.get(i).cloned()).collect();
            Series::new(name, cells)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn text_cells(series: &Series) -> Result<Vec<Option<String>>> {
    let text = series.cast(&DataType::Utf8)?;
    let cells = text
        .utf8()?
        .into_iter()
        .map(|cell| cell.map(str::to_string))
        .collect();
    Ok(cells)
}

fn is_blank(cell: &Option<String>) -> bool {
    cell.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Load a date-indexed numeric series from a delimited text file
///
/// Unparseable dates and values become missing. With the default options the
/// result holds only complete rows sorted by date.
pub fn load_timeseries<P, D, V>(
    filepath: P,
    date_col: D,
    value_col: V,
    options: &LoadOptions,
) -> Result<TimeSeries>
where
    P: AsRef<Path>,
    D: Into<ColumnSelector>,
    V: Into<ColumnSelector>,
{
    let path = filepath.as_ref();
    if !path.exists() {
        return Err(SeriesError::FileNotFound(path.to_path_buf()));
    }
    if !options.has_header {
        options.headerless_names()?;
    }

    let df = read_text_table(path, options)?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read table");

    let date_column = date_col.into().resolve(&df)?;
    let value_column = value_col.into().resolve(&df)?;
    let value_name = value_column.name().to_string();

    let date_cells = text_cells(date_column)?;
    let index: Vec<_> = date_cells
        .iter()
        .map(|cell| {
            let text = cell.as_deref()?;
            match &options.date_format {
                Some(format) => parse_with_format(text, format),
                None => parse_date(text, options.date_order),
            }
        })
        .collect();

    let value_cells = text_cells(value_column)?;
    let values: Vec<_> = value_cells
        .iter()
        .map(|cell| cell.as_deref()?.trim().parse::<f64>().ok())
        .collect();

    let bad_dates = date_cells
        .iter()
        .zip(&index)
        .filter(|(cell, parsed)| !is_blank(cell) && parsed.is_none())
        .count();
    let bad_values = value_cells
        .iter()
        .zip(&values)
        .filter(|(cell, parsed)| !is_blank(cell) && parsed.is_none())
        .count();
    debug!(bad_dates, bad_values, "coerced unparseable fields to missing");

    let mut series = TimeSeries::new(index, values)?
        .with_name(value_name)
        .with_index_name(options.index_name.clone());

    if options.dropna {
        series = series.dropna();
    }
    if options.sort_index {
        series = series.sort_index();
    }
    if let Some(freq) = options.freq {
        series = series.asfreq(freq)?;
        debug!(%freq, len = series.len(), missing = series.missing_count(), "reindexed to frequency");
    }

    Ok(series)
}
