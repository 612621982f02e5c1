//! Box-Cox variance stabilization

use crate::data::TimeSeries;
use crate::error::{Result, SeriesError};
use series_math::boxcox;
use series_math::MathError;
use tracing::debug;

/// Box-Cox transform of the present values of `series`
///
/// With `lambda = None` the parameter is estimated by maximum likelihood.
/// Returns the transformed series, named `<name>_boxcox`, and the lambda used.
pub fn boxcox_transform(series: &TimeSeries, lambda: Option<f64>) -> Result<(TimeSeries, f64)> {
    let clean = series.drop_missing_values();
    let values = clean.observed_values();

    if let Some(bad) = values.iter().find(|v| **v <= 0.0) {
        return Err(SeriesError::DomainViolation(format!(
            "Box-Cox transform requires all values > 0, found {}",
            bad
        )));
    }

    let (transformed, lambda) = match lambda {
        Some(lambda) => (boxcox::boxcox(&values, lambda)?, lambda),
        None => boxcox::boxcox_fit(&values).map_err(|err| match err {
            MathError::InsufficientData(msg) | MathError::InvalidInput(msg) => {
                SeriesError::InvalidData(msg)
            }
            other => SeriesError::MathError(other),
        })?,
    };
    debug!(lambda, n = values.len(), "box-cox transform");

    let name = match series.name() {
        Some(name) if !name.is_empty() => format!("{}_boxcox", name),
        _ => "series_boxcox".to_string(),
    };
    let mut out = clean.with_values(transformed.into_iter().map(Some).collect());
    out.set_name(Some(name));
    Ok((out, lambda))
}

/// Undo `boxcox_transform` for a known lambda; missing values stay missing
pub fn inv_boxcox(series: &TimeSeries, lambda: f64) -> TimeSeries {
    let restored = boxcox::inv_boxcox(&series.observed_values(), lambda);
    let mut restored = restored.into_iter();

    let values = series
        .values()
        .iter()
        .map(|v| v.and_then(|_| restored.next()).filter(|x| !x.is_nan()))
        .collect();
    series.with_values(values)
}
