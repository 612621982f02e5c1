//! Ordinary least squares
//!
//! A small dense OLS solver used by the unit-root test. The design matrix is
//! passed column by column and factored with Householder reflections, so the
//! fit never forms `X'X`. A column that is numerically a combination of the
//! columns before it is aliased: its coefficient is zero, its standard error
//! is NaN, and it does not count towards the rank.

use crate::{MathError, Result};
use std::f64::consts::PI;

/// Relative size below which the part of a column left after projecting out
/// the earlier columns counts as zero
const RANK_TOLERANCE: f64 = 1e-10;

/// Fitted OLS regression
#[derive(Debug, Clone)]
pub struct OlsFit {
    params: Vec<f64>,
    std_errors: Vec<f64>,
    ssr: f64,
    nobs: usize,
    rank: usize,
}

impl OlsFit {
    /// Fit `y = X b + e`, where `columns` holds the columns of `X`
    pub fn fit(y: &[f64], columns: &[Vec<f64>]) -> Result<Self> {
        let n = y.len();
        let k = columns.len();

        if k == 0 {
            return Err(MathError::InvalidInput(
                "Regression needs at least one regressor".to_string(),
            ));
        }
        if let Some(col) = columns.iter().find(|c| c.len() != n) {
            return Err(MathError::InvalidInput(format!(
                "Regressor length ({}) doesn't match response length ({})",
                col.len(),
                n
            )));
        }
        if n <= k {
            return Err(MathError::InsufficientData(format!(
                "Need more than {} observations for {} regressors, have {}",
                k, k, n
            )));
        }

        let qr = HouseholderQr::factor(columns, y);
        let rank = qr.kept.len();
        if rank == 0 {
            return Err(MathError::CalculationError(
                "Every regressor is zero".to_string(),
            ));
        }

        let coefficients = qr.solve();
        let r_inverse = qr.r_inverse();
        let ssr: f64 = qr.qty[rank..].iter().map(|v| v * v).sum();
        let sigma2 = ssr / (n - rank) as f64;

        let mut params = vec![0.0; k];
        let mut std_errors = vec![f64::NAN; k];
        for (m, &j) in qr.kept.iter().enumerate() {
            params[j] = coefficients[m];
            let row_norm: f64 = r_inverse[m].iter().map(|v| v * v).sum();
            std_errors[j] = (sigma2 * row_norm).sqrt();
        }

        Ok(Self {
            params,
            std_errors,
            ssr,
            nobs: n,
            rank,
        })
    }

    /// Estimated coefficients, in column order
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Standard errors of the coefficients; NaN for aliased columns
    pub fn std_errors(&self) -> &[f64] {
        &self.std_errors
    }

    /// t statistic of coefficient `i`
    pub fn t_value(&self, i: usize) -> f64 {
        self.params[i] / self.std_errors[i]
    }

    /// Sum of squared residuals
    pub fn ssr(&self) -> f64 {
        self.ssr
    }

    /// Number of observations used in the fit
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Number of columns passed to the fit
    pub fn n_params(&self) -> usize {
        self.params.len()
    }

    /// Number of linearly independent columns
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Gaussian log-likelihood at the fitted coefficients
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -n / 2.0 * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.rank as f64
    }

    /// Bayesian information criterion
    pub fn bic(&self) -> f64 {
        -2.0 * self.log_likelihood() + (self.nobs as f64).ln() * self.rank as f64
    }
}

/// `X = Q R` for the kept columns, with `Q'y` alongside
struct HouseholderQr {
    /// Columns overwritten in place; `R` sits in the leading rows of the kept ones
    columns: Vec<Vec<f64>>,
    /// Indices of the columns that were not aliased, in order
    kept: Vec<usize>,
    qty: Vec<f64>,
}

impl HouseholderQr {
    fn factor(columns: &[Vec<f64>], y: &[f64]) -> Self {
        let n = y.len();
        let k = columns.len();
        let mut a = columns.to_vec();
        let mut qty = y.to_vec();
        let norms: Vec<f64> = columns
            .iter()
            .map(|c| c.iter().map(|v| v * v).sum::<f64>().sqrt())
            .collect();

        let mut kept = Vec::with_capacity(k);
        let mut row = 0;
        for j in 0..k {
            if row >= n {
                break;
            }
            let s = a[j][row..].iter().map(|v| v * v).sum::<f64>().sqrt();
            if norms[j] == 0.0 || s <= RANK_TOLERANCE * norms[j] {
                continue;
            }

            let alpha = if a[j][row] >= 0.0 { -s } else { s };
            let mut v = a[j][row..].to_vec();
            v[0] -= alpha;
            let vn: f64 = v.iter().map(|t| t * t).sum();

            for column in a[j..].iter_mut() {
                reflect(&v, vn, &mut column[row..]);
            }
            reflect(&v, vn, &mut qty[row..]);

            kept.push(j);
            row += 1;
        }

        Self {
            columns: a,
            kept,
            qty,
        }
    }

    fn r(&self, i: usize, m: usize) -> f64 {
        self.columns[self.kept[m]][i]
    }

    /// Back substitution of `R b = Q'y`
    fn solve(&self) -> Vec<f64> {
        let rank = self.kept.len();
        let mut b = vec![0.0; rank];
        for i in (0..rank).rev() {
            let tail: f64 = (i + 1..rank).map(|m| self.r(i, m) * b[m]).sum();
            b[i] = (self.qty[i] - tail) / self.r(i, i);
        }
        b
    }

    /// Upper-triangular `R^-1`; `(X'X)^-1 = R^-1 R^-T`
    fn r_inverse(&self) -> Vec<Vec<f64>> {
        let rank = self.kept.len();
        let mut inv = vec![vec![0.0; rank]; rank];
        for c in 0..rank {
            for i in (0..=c).rev() {
                let e = if i == c { 1.0 } else { 0.0 };
                let tail: f64 = (i + 1..=c).map(|m| self.r(i, m) * inv[m][c]).sum();
                inv[i][c] = (e - tail) / self.r(i, i);
            }
        }
        inv
    }
}

/// Apply `I - 2 v v' / (v'v)` to `target`
fn reflect(v: &[f64], vn: f64, target: &mut [f64]) {
    let dot: f64 = v.iter().zip(target.iter()).map(|(a, b)| a * b).sum();
    let d = dot * 2.0 / vn;
    for (t, vi) in target.iter_mut().zip(v) {
        *t -= d * vi;
    }
}
