//! Autocorrelation and partial autocorrelation

use crate::{mean, MathError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Biased autocovariance (denominator `n`) for lags `0..=nlags`
pub fn autocovariance(values: &[f64], nlags: usize) -> Result<Vec<f64>> {
    let n = values.len();
    if n == 0 {
        return Err(MathError::InsufficientData(
            "Autocovariance of an empty series".to_string(),
        ));
    }
    if nlags >= n {
        return Err(MathError::InvalidInput(format!(
            "Number of lags ({}) must be smaller than the number of observations ({})",
            nlags, n
        )));
    }

    let m = mean(values);
    let centered: Vec<f64> = values.iter().map(|v| v - m).collect();
    Ok((0..=nlags)
        .map(|k| {
            centered[..n - k]
                .iter()
                .zip(&centered[k..])
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n as f64
        })
        .collect())
}

/// Autocorrelation for lags `0..=nlags`
pub fn acf(values: &[f64], nlags: usize) -> Result<Vec<f64>> {
    let acov = autocovariance(values, nlags)?;
    if acov[0] == 0.0 {
        return Err(MathError::CalculationError(
            "Autocorrelation of a constant series is undefined".to_string(),
        ));
    }
    Ok(acov.iter().map(|c| c / acov[0]).collect())
}

/// Partial autocorrelation for lags `0..=nlags` by Yule-Walker
///
/// Uses the Levinson-Durbin recursion on the biased autocovariance, which
/// keeps every coefficient inside [-1, 1].
pub fn pacf_yule_walker(values: &[f64], nlags: usize) -> Result<Vec<f64>> {
    if nlags >= values.len() / 2 {
        return Err(MathError::InvalidInput(format!(
            "Can only compute partial correlations for lags up to 50% of the sample size; \
             requested {} lags for {} observations",
            nlags,
            values.len()
        )));
    }

    let r = acf(values, nlags)?;
    let mut pacf = Vec::with_capacity(nlags + 1);
    pacf.push(1.0);

    let mut phi: Vec<f64> = Vec::with_capacity(nlags);
    let mut sigma = 1.0;
    for k in 1..=nlags {
        let reflection = (r[k] - (0..k - 1).map(|j| phi[j] * r[k - 1 - j]).sum::<f64>()) / sigma;

        let mut next = Vec::with_capacity(k);
        for j in 0..k - 1 {
            next.push(phi[j] - reflection * phi[k - 2 - j]);
        }
        next.push(reflection);

        phi = next;
        sigma *= 1.0 - reflection * reflection;
        pacf.push(reflection);
    }

    Ok(pacf)
}

fn z_value(alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Significance level must be between 0 and 1, got {}",
            alpha
        )));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| MathError::CalculationError(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - alpha / 2.0))
}

/// Half-widths of Bartlett confidence bands for each autocorrelation lag
///
/// Lag 0 has zero width.
pub fn acf_confidence(acf: &[f64], nobs: usize, alpha: f64) -> Result<Vec<f64>> {
    let z = z_value(alpha)?;
    let n = nobs as f64;

    let mut widths = Vec::with_capacity(acf.len());
    let mut cumulative = 0.0;
    for (k, _) in acf.iter().enumerate() {
        if k == 0 {
            widths.push(0.0);
            continue;
        }
        if k > 1 {
            cumulative += acf[k - 1].powi(2);
        }
        widths.push(z * ((1.0 + 2.0 * cumulative) / n).sqrt());
    }
    Ok(widths)
}

/// Half-width of the confidence band for partial autocorrelations
pub fn pacf_confidence(nobs: usize, alpha: f64) -> Result<f64> {
    Ok(z_value(alpha)? / (nobs as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_acf_of_alternating_series() {
        let values: Vec<f64> = (0..20).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let r = acf(&values, 3).unwrap();
        assert_eq!(r[0], 1.0);
        assert_abs_diff_eq!(r[1], -19.0 / 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r[2], 18.0 / 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pacf_of_ar1_process() {
        // x[t] = 0.6 x[t-1] + e[t] with a deterministic innovation sequence
        let mut state: u64 = 42;
        let mut x = vec![0.0];
        for _ in 1..2000 {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let e = ((state >> 11) as f64 / (1u64 << 53) as f64) - 0.5;
            let prev = *x.last().unwrap();
            x.push(0.6 * prev + e);
        }

        let p = pacf_yule_walker(&x, 5).unwrap();
        assert_eq!(p[0], 1.0);
        assert_abs_diff_eq!(p[1], 0.6, epsilon = 0.06);
        for lag in 2..=5 {
            assert!(p[lag].abs() < 0.1, "lag {} pacf {}", lag, p[lag]);
        }
    }

    #[test]
    fn test_pacf_first_lag_equals_acf() {
        let values = [1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 5.0, 8.0, 7.0, 9.0];
        let r = acf(&values, 2).unwrap();
        let p = pacf_yule_walker(&values, 2).unwrap();
        assert_abs_diff_eq!(p[1], r[1], epsilon = 1e-12);
    }

    #[test]
    fn test_lag_limits() {
        let values = [1.0, 2.0, 3.0, 2.0, 1.0, 2.0];
        assert!(acf(&values, 6).is_err());
        assert!(pacf_yule_walker(&values, 3).is_err());
        assert!(acf(&[2.0, 2.0, 2.0], 1).is_err());
    }

    #[test]
    fn test_confidence_bands() {
        let r = [1.0, 0.5, 0.2];
        let widths = acf_confidence(&r, 100, 0.05).unwrap();
        assert_eq!(widths[0], 0.0);
        assert_abs_diff_eq!(widths[1], 1.959964 / 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(widths[2], 1.959964 * (1.5f64 / 100.0).sqrt(), epsilon = 1e-5);
        assert_abs_diff_eq!(pacf_confidence(100, 0.05).unwrap(), 0.1959964, epsilon = 1e-6);
        assert!(pacf_confidence(100, 1.5).is_err());
    }
}
