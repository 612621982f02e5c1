//! Classical seasonal decomposition by moving averages

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the seasonal component combines with the trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecompositionModel {
    /// observed = trend + seasonal + residual
    #[default]
    Additive,
    /// observed = trend * seasonal * residual
    Multiplicative,
}

impl FromStr for DecompositionModel {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "additive" | "add" => Ok(DecompositionModel::Additive),
            "multiplicative" | "mul" => Ok(DecompositionModel::Multiplicative),
            _ => Err(MathError::InvalidInput(format!(
                "Unsupported decomposition model: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for DecompositionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompositionModel::Additive => f.write_str("additive"),
            DecompositionModel::Multiplicative => f.write_str("multiplicative"),
        }
    }
}

/// Components of a decomposed series
///
/// Trend and residual are `None` at the edges where the centered moving
/// average is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct Components {
    pub observed: Vec<f64>,
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
    pub period: usize,
    pub model: DecompositionModel,
}

/// Weights of the centered moving average for `period`
fn trend_filter(period: usize) -> Vec<f64> {
    let p = period as f64;
    if period % 2 == 0 {
        let mut weights = vec![1.0 / p; period + 1];
        weights[0] = 0.5 / p;
        weights[period] = 0.5 / p;
        weights
    } else {
        vec![1.0 / p; period]
    }
}

/// Decompose `values` into trend, seasonal and residual components
pub fn seasonal_decompose(
    values: &[f64],
    model: DecompositionModel,
    period: usize,
) -> Result<Components> {
    let n = values.len();

    if period == 0 {
        return Err(MathError::InvalidInput(
            "Seasonal period must be at least 1".to_string(),
        ));
    }
    if n < 2 * period {
        return Err(MathError::InsufficientData(format!(
            "Decomposition needs two complete cycles ({} observations), have {}",
            2 * period,
            n
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Decomposition does not accept missing or infinite values".to_string(),
        ));
    }
    if model == DecompositionModel::Multiplicative && values.iter().any(|v| *v <= 0.0) {
        return Err(MathError::InvalidInput(
            "Multiplicative seasonality is not appropriate for zero and negative values"
                .to_string(),
        ));
    }

    let filter = trend_filter(period);
    let half = filter.len() / 2;
    let trend: Vec<Option<f64>> = (0..n)
        .map(|t| {
            if t < half || t + half >= n {
                None
            } else {
                Some(
                    filter
                        .iter()
                        .enumerate()
                        .map(|(j, w)| w * values[t - half + j])
                        .sum(),
                )
            }
        })
        .collect();

    let detrended: Vec<Option<f64>> = values
        .iter()
        .zip(&trend)
        .map(|(x, tr)| {
            tr.map(|tr| match model {
                DecompositionModel::Additive => x - tr,
                DecompositionModel::Multiplicative => x / tr,
            })
        })
        .collect();

    let mut period_averages: Vec<f64> = (0..period)
        .map(|phase| {
            let phase_values: Vec<f64> = detrended
                .iter()
                .skip(phase)
                .step_by(period)
                .flatten()
                .copied()
                .collect();
            phase_values.iter().sum::<f64>() / phase_values.len() as f64
        })
        .collect();

    let level = period_averages.iter().sum::<f64>() / period as f64;
    for avg in period_averages.iter_mut() {
        match model {
            DecompositionModel::Additive => *avg -= level,
            DecompositionModel::Multiplicative => *avg /= level,
        }
    }

    let seasonal: Vec<f64> = (0..n).map(|t| period_averages[t % period]).collect();
    let residual = detrended
        .iter()
        .zip(&seasonal)
        .map(|(d, s)| {
            d.map(|d| match model {
                DecompositionModel::Additive => d - s,
                DecompositionModel::Multiplicative => d / s,
            })
        })
        .collect();

    Ok(Components {
        observed: values.to_vec(),
        trend,
        seasonal,
        residual,
        period,
        model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const PATTERN: [f64; 4] = [3.0, -1.0, -4.0, 2.0];

    fn trending_seasonal(n: usize) -> Vec<f64> {
        (0..n)
            .map(|t| 10.0 + 0.5 * t as f64 + PATTERN[t % 4])
            .collect()
    }

    #[test]
    fn test_additive_recovers_components() {
        let values = trending_seasonal(24);
        let parts = seasonal_decompose(&values, DecompositionModel::Additive, 4).unwrap();

        assert!(parts.trend[0].is_none() && parts.trend[1].is_none());
        assert!(parts.trend[22].is_none() && parts.trend[23].is_none());
        for t in 2..22 {
            assert_abs_diff_eq!(parts.trend[t].unwrap(), 10.0 + 0.5 * t as f64, epsilon = 1e-9);
            assert_abs_diff_eq!(parts.residual[t].unwrap(), 0.0, epsilon = 1e-9);
        }
        for t in 0..24 {
            assert_abs_diff_eq!(parts.seasonal[t], PATTERN[t % 4], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_multiplicative_seasonal_factors_average_one() {
        let values: Vec<f64> = (0..36)
            .map(|t| (100.0 + t as f64) * [1.1, 0.9, 1.0][t % 3])
            .collect();
        let parts = seasonal_decompose(&values, DecompositionModel::Multiplicative, 3).unwrap();
        let mean_factor = parts.seasonal[..3].iter().sum::<f64>() / 3.0;
        assert_abs_diff_eq!(mean_factor, 1.0, epsilon = 1e-12);
        assert!(parts.seasonal[0] > 1.0 && parts.seasonal[1] < 1.0);
    }

    #[test]
    fn test_input_validation() {
        let values = trending_seasonal(7);
        assert!(matches!(
            seasonal_decompose(&values, DecompositionModel::Additive, 4),
            Err(MathError::InsufficientData(_))
        ));

        let with_zero = vec![1.0, 0.0, 2.0, 3.0, 1.0, 2.0];
        assert!(matches!(
            seasonal_decompose(&with_zero, DecompositionModel::Multiplicative, 2),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_model() {
        assert_eq!(
            "multiplicative".parse::<DecompositionModel>().unwrap(),
            DecompositionModel::Multiplicative
        );
        assert!("stl".parse::<DecompositionModel>().is_err());
    }
}
