//! Box-Cox power transform
//!
//! `y = (x^λ - 1) / λ` for `λ != 0` and `y = ln x` for `λ = 0`.
//! Input must be strictly positive.

use crate::optimize::minimize_scalar;
use crate::{population_variance, MathError, Result};

/// Starting points for the likelihood search
const LAMBDA_BRACKET: (f64, f64) = (-2.0, 2.0);

fn check_positive(values: &[f64]) -> Result<()> {
    if let Some(bad) = values.iter().find(|v| **v <= 0.0 || v.is_nan()) {
        return Err(MathError::InvalidInput(format!(
            "Box-Cox transform requires strictly positive values, found {}",
            bad
        )));
    }
    Ok(())
}

fn transform_value(x: f64, lambda: f64) -> f64 {
    if lambda == 0.0 {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    }
}

/// Apply the transform with a fixed lambda
pub fn boxcox(values: &[f64], lambda: f64) -> Result<Vec<f64>> {
    check_positive(values)?;
    if !lambda.is_finite() {
        return Err(MathError::InvalidInput(format!(
            "Lambda must be finite, got {}",
            lambda
        )));
    }
    Ok(values.iter().map(|x| transform_value(*x, lambda)).collect())
}

/// Invert the transform
///
/// Points outside the image of the transform (`λ·y + 1 <= 0` for `λ > 0`)
/// map to `NaN`.
pub fn inv_boxcox(values: &[f64], lambda: f64) -> Vec<f64> {
    values
        .iter()
        .map(|y| {
            if lambda == 0.0 {
                y.exp()
            } else {
                (lambda * y + 1.0).powf(1.0 / lambda)
            }
        })
        .collect()
}

/// Box-Cox log-likelihood of `values` at `lambda`
pub fn boxcox_llf(values: &[f64], lambda: f64) -> f64 {
    let n = values.len() as f64;
    let log_sum: f64 = values.iter().map(|x| x.ln()).sum();
    let transformed: Vec<f64> = values.iter().map(|x| transform_value(*x, lambda)).collect();
    (lambda - 1.0) * log_sum - n / 2.0 * population_variance(&transformed).ln()
}

/// Maximum-likelihood estimate of lambda
pub fn boxcox_mle(values: &[f64]) -> Result<f64> {
    check_positive(values)?;
    if values.len() < 2 {
        return Err(MathError::InsufficientData(
            "Box-Cox estimation needs at least 2 values".to_string(),
        ));
    }
    if values.iter().all(|v| *v == values[0]) {
        return Err(MathError::InvalidInput(
            "Box-Cox estimation needs non-constant data".to_string(),
        ));
    }

    let (lambda, _) = minimize_scalar(
        |lambda| -boxcox_llf(values, lambda),
        LAMBDA_BRACKET.0,
        LAMBDA_BRACKET.1,
    )?;

    if !lambda.is_finite() {
        return Err(MathError::CalculationError(
            "Box-Cox likelihood search diverged".to_string(),
        ));
    }
    Ok(lambda)
}

/// Estimate lambda and transform in one step
pub fn boxcox_fit(values: &[f64]) -> Result<(Vec<f64>, f64)> {
    let lambda = boxcox_mle(values)?;
    Ok((boxcox(values, lambda)?, lambda))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_case() {
        let out = boxcox(&[1.0, std::f64::consts::E], 0.0).unwrap();
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(boxcox(&[1.0, 0.0, 2.0], 0.5).is_err());
        assert!(boxcox_mle(&[3.0, -1.0, 2.0]).is_err());
    }

    #[test]
    fn test_inverse_round_trip() {
        let values = [1.5, 2.0, 7.25, 100.0, 0.3];
        for lambda in [-1.0, 0.0, 0.5, 2.0] {
            let transformed = boxcox(&values, lambda).unwrap();
            let restored = inv_boxcox(&transformed, lambda);
            for (a, b) in values.iter().zip(&restored) {
                assert_relative_eq!(a, b, max_relative = 1e-10);
            }
        }
    }

    #[test]
    fn test_mle_is_a_maximum() {
        let values: Vec<f64> = (1..=40).map(|i| ((i as f64) * 0.37).exp()).collect();
        let lambda = boxcox_mle(&values).unwrap();
        let best = boxcox_llf(&values, lambda);
        assert!(best >= boxcox_llf(&values, lambda + 0.05));
        assert!(best >= boxcox_llf(&values, lambda - 0.05));
    }

    #[test]
    fn test_lognormal_quantiles_give_log_transform() {
        use statrs::distribution::{ContinuousCDF, Normal};

        let normal = Normal::new(0.0, 1.0).unwrap();
        let values: Vec<f64> = (1..=50)
            .map(|i| normal.inverse_cdf((i as f64 - 0.5) / 50.0).exp())
            .collect();
        let lambda = boxcox_mle(&values).unwrap();
        assert!(lambda.abs() < 0.15, "lambda = {}", lambda);
    }

    #[test]
    fn test_constant_data_cannot_be_estimated() {
        assert!(matches!(
            boxcox_mle(&[4.0, 4.0, 4.0]),
            Err(MathError::InvalidInput(_))
        ));
    }
}
