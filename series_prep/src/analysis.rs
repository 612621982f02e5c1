//! Decomposition and correlograms of a `TimeSeries`

use crate::data::TimeSeries;
use crate::error::{Result, SeriesError};
use crate::frequency::Frequency;
use chrono::NaiveDateTime;
use series_math::correlation;
use series_math::decomposition::{self, DecompositionModel};
use series_math::MathError;
use tracing::debug;

/// Trend, seasonal and residual parts of a series, on the observed index
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub observed: TimeSeries,
    pub trend: TimeSeries,
    pub seasonal: TimeSeries,
    pub residual: TimeSeries,
    pub period: usize,
    pub model: DecompositionModel,
}

/// Seasonal period implied by the series' frequency, attached or inferred
pub fn infer_period(series: &TimeSeries) -> Option<usize> {
    if let Some(freq) = series.freq() {
        return Some(freq.seasonal_period());
    }
    let stamps: Vec<NaiveDateTime> = series.index().iter().flatten().copied().collect();
    Frequency::infer(&stamps).map(|freq| freq.seasonal_period())
}

/// Classical decomposition by moving averages
///
/// Missing entries are dropped first. The period falls back to the one
/// implied by the series frequency.
pub fn seasonal_decompose(
    series: &TimeSeries,
    model: DecompositionModel,
    period: Option<usize>,
) -> Result<Decomposition> {
    let clean = series.dropna();
    let period = match period.or_else(|| infer_period(&clean).or_else(|| infer_period(series))) {
        Some(period) => period,
        None => {
            return Err(SeriesError::MissingConfiguration(
                "A period must be given when the series has no regular frequency".to_string(),
            ))
        }
    };

    let (index, values): (Vec<NaiveDateTime>, Vec<f64>) = clean.observed().into_iter().unzip();
    if model == DecompositionModel::Multiplicative && values.iter().any(|v| *v <= 0.0) {
        return Err(SeriesError::DomainViolation(
            "Multiplicative seasonality is not appropriate for zero and negative values"
                .to_string(),
        ));
    }

    let parts = decomposition::seasonal_decompose(&values, model, period).map_err(|err| match err {
        MathError::InsufficientData(msg) => SeriesError::InvalidData(msg),
        MathError::InvalidInput(msg) => SeriesError::InvalidParameter(msg),
        other => SeriesError::MathError(other),
    })?;
    debug!(period, %model, n = values.len(), "seasonal decomposition");

    let stamps: Vec<Option<NaiveDateTime>> = index.into_iter().map(Some).collect();
    let component = |values: Vec<Option<f64>>, label: &str| -> Result<TimeSeries> {
        let mut out = TimeSeries::new(stamps.clone(), values)?;
        out.set_name(Some(label.to_string()));
        out.set_index_name(clean.index_name().map(str::to_string));
        Ok(out)
    };

    Ok(Decomposition {
        observed: clean.clone(),
        trend: component(parts.trend, "trend")?,
        seasonal: component(parts.seasonal.into_iter().map(Some).collect(), "seasonal")?,
        residual: component(parts.residual, "resid")?,
        period,
        model,
    })
}

/// Correlation estimates for lags `0..=nlags` with confidence half-widths
#[derive(Debug, Clone, PartialEq)]
pub struct Correlogram {
    pub values: Vec<f64>,
    /// Half-width of the band around zero at each lag; zero at lag 0
    pub confidence: Vec<f64>,
    /// Observations the estimate was computed from
    pub nobs: usize,
}

impl Correlogram {
    pub fn nlags(&self) -> usize {
        self.values.len().saturating_sub(1)
    }
}

fn correlation_error(err: MathError) -> SeriesError {
    match err {
        MathError::InvalidInput(msg) => SeriesError::InvalidParameter(msg),
        MathError::InsufficientData(msg) | MathError::CalculationError(msg) => {
            SeriesError::InvalidData(msg)
        }
    }
}

/// Autocorrelation of the present values with Bartlett bands
pub fn acf(series: &TimeSeries, nlags: usize, alpha: f64) -> Result<Correlogram> {
    let values = series.observed_values();
    let estimates = correlation::acf(&values, nlags).map_err(correlation_error)?;
    let confidence =
        correlation::acf_confidence(&estimates, values.len(), alpha).map_err(correlation_error)?;

    Ok(Correlogram {
        values: estimates,
        confidence,
        nobs: values.len(),
    })
}

/// Yule-Walker partial autocorrelation of the present values
///
/// `nlags` must be below half the number of observations.
pub fn pacf(series: &TimeSeries, nlags: usize, alpha: f64) -> Result<Correlogram> {
    let values = series.observed_values();
    let estimates = correlation::pacf_yule_walker(&values, nlags).map_err(correlation_error)?;
    let width = correlation::pacf_confidence(values.len(), alpha).map_err(correlation_error)?;

    let mut confidence = vec![width; estimates.len()];
    if let Some(first) = confidence.first_mut() {
        *first = 0.0;
    }

    Ok(Correlogram {
        values: estimates,
        confidence,
        nobs: values.len(),
    })
}
