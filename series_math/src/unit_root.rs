//! Augmented Dickey-Fuller unit-root test
//!
//! The regression is
//!
//! ```text
//! Δx[t] = γ·x[t-1] + Σ δ[j]·Δx[t-j] + deterministic terms + e[t]
//! ```
//!
//! and the test statistic is the t value of `γ`. P-values follow the
//! MacKinnon (1994) response surfaces and critical values the MacKinnon
//! (2010) finite-sample tables, both for a single series (N = 1).

use crate::regression::OlsFit;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;
use std::str::FromStr;

/// Deterministic terms included in the test regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Regression {
    /// No constant, no trend ("n")
    #[serde(rename = "n")]
    NoConstant,
    /// Constant only ("c")
    #[default]
    #[serde(rename = "c")]
    Constant,
    /// Constant and linear trend ("ct")
    #[serde(rename = "ct")]
    ConstantTrend,
}

impl Regression {
    fn trend_terms(self) -> usize {
        match self {
            Regression::NoConstant => 0,
            Regression::Constant => 1,
            Regression::ConstantTrend => 2,
        }
    }

    fn trend_columns(self, nobs: usize) -> Vec<Vec<f64>> {
        let mut columns = Vec::with_capacity(self.trend_terms());
        if self != Regression::NoConstant {
            columns.push(vec![1.0; nobs]);
        }
        if self == Regression::ConstantTrend {
            columns.push((1..=nobs).map(|t| t as f64).collect());
        }
        columns
    }
}

impl FromStr for Regression {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "n" | "nc" => Ok(Regression::NoConstant),
            "c" => Ok(Regression::Constant),
            "ct" => Ok(Regression::ConstantTrend),
            _ => Err(MathError::InvalidInput(format!(
                "Unsupported regression: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for Regression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Regression::NoConstant => "n",
            Regression::Constant => "c",
            Regression::ConstantTrend => "ct",
        };
        f.write_str(code)
    }
}

/// Criterion used to pick the number of lagged differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoLag {
    /// Akaike information criterion
    #[serde(rename = "AIC")]
    Aic,
    /// Bayesian information criterion
    #[serde(rename = "BIC")]
    Bic,
    /// Drop lags from the top until the last one is significant at 5%
    #[serde(rename = "t-stat")]
    TStat,
}

impl FromStr for AutoLag {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "aic" => Ok(AutoLag::Aic),
            "bic" => Ok(AutoLag::Bic),
            "t-stat" | "tstat" => Ok(AutoLag::TStat),
            _ => Err(MathError::InvalidInput(format!(
                "Unsupported autolag criterion: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for AutoLag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AutoLag::Aic => "AIC",
            AutoLag::Bic => "BIC",
            AutoLag::TStat => "t-stat",
        };
        f.write_str(name)
    }
}

/// Raw outcome of the test
#[derive(Debug, Clone, PartialEq)]
pub struct AdfOutcome {
    /// t value of the lagged level
    pub statistic: f64,
    /// MacKinnon approximate p-value
    pub p_value: f64,
    /// Number of lagged differences in the final regression
    pub used_lag: usize,
    /// Observations in the final regression
    pub n_obs: usize,
    /// Critical values at 1%, 5% and 10%
    pub critical_values: [f64; 3],
    /// Best information criterion value (or |t| for the t-stat rule)
    pub ic_best: Option<f64>,
}

/// Significance levels matching `AdfOutcome::critical_values`
pub const CRITICAL_LEVELS: [&str; 3] = ["1%", "5%", "10%"];

const T_STAT_STOP: f64 = 1.644_853_626_951_472_2;

/// Run the augmented Dickey-Fuller test on a series without missing values
///
/// With `maxlag = None` the maximum lag is `ceil(12 (n/100)^(1/4))`, capped at
/// `min(n/2 - 1 - ntrend, (n - 3 - ntrend)/2)` so that the regression keeps
/// at least one residual degree of freedom. With `autolag = None`
/// the maximum lag is used as is.
pub fn adfuller(
    x: &[f64],
    maxlag: Option<usize>,
    regression: Regression,
    autolag: Option<AutoLag>,
) -> Result<AdfOutcome> {
    let nobs = x.len();
    let ntrend = regression.trend_terms() as i64;
    // the lag-selection sample needs more rows than regressors
    let cap = ((nobs / 2) as i64 - ntrend - 1).min((nobs as i64 - 3 - ntrend).div_euclid(2));

    if nobs < 4 {
        return Err(MathError::InsufficientData(format!(
            "ADF test needs at least 4 observations, have {}",
            nobs
        )));
    }
    if x.iter().all(|v| *v == x[0]) {
        return Err(MathError::InvalidInput(
            "Invalid input, series is constant".to_string(),
        ));
    }

    let maxlag = match maxlag {
        Some(lag) => {
            if lag as i64 > cap {
                return Err(MathError::InvalidInput(format!(
                    "maxlag must be at most {} for {} observations",
                    cap, nobs
                )));
            }
            lag
        }
        None => {
            let default = (12.0 * (nobs as f64 / 100.0).powf(0.25)).ceil() as i64;
            let lag = default.min(cap);
            if lag < 0 {
                return Err(MathError::InsufficientData(
                    "Sample size is too short to use selected regression component".to_string(),
                ));
            }
            lag as usize
        }
    };

    let xdiff: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

    let (used_lag, ic_best) = match autolag {
        Some(criterion) => {
            let (best, ic) = select_lag(x, &xdiff, maxlag, regression, criterion)?;
            (best, Some(ic))
        }
        None => (maxlag, None),
    };

    let (y, mut columns) = lagged_design(x, &xdiff, used_lag, used_lag);
    let n_eff = y.len();
    columns.extend(regression.trend_columns(n_eff));

    let fit = OlsFit::fit(&y, &columns)?;
    let statistic = fit.t_value(0);
    if !statistic.is_finite() {
        return Err(MathError::CalculationError(
            "ADF regression produced a non-finite test statistic".to_string(),
        ));
    }

    Ok(AdfOutcome {
        statistic,
        p_value: mackinnon_p_value(statistic, regression),
        used_lag,
        n_obs: n_eff,
        critical_values: mackinnon_critical_values(regression, n_eff),
        ic_best,
    })
}

/// Response and `[level, Δx lag 1, …, Δx lag lags]` columns on the sample
/// that leaves room for `sample_lag` lags
fn lagged_design(
    x: &[f64],
    xdiff: &[f64],
    lags: usize,
    sample_lag: usize,
) -> (Vec<f64>, Vec<Vec<f64>>) {
    let rows = sample_lag..xdiff.len();
    let y: Vec<f64> = rows.clone().map(|t| xdiff[t]).collect();

    let mut columns = Vec::with_capacity(lags + 1);
    columns.push(rows.clone().map(|t| x[t]).collect());
    for j in 1..=lags {
        columns.push(rows.clone().map(|t| xdiff[t - j]).collect());
    }

    (y, columns)
}

/// Pick the lag with every candidate fitted on the same sample
fn select_lag(
    x: &[f64],
    xdiff: &[f64],
    maxlag: usize,
    regression: Regression,
    criterion: AutoLag,
) -> Result<(usize, f64)> {
    let (y, lag_columns) = lagged_design(x, xdiff, maxlag, maxlag);
    let trend = regression.trend_columns(y.len());

    let mut fits = Vec::with_capacity(maxlag + 1);
    for lag in 0..=maxlag {
        let mut columns = trend.clone();
        columns.extend(lag_columns[..=lag].iter().cloned());
        fits.push(OlsFit::fit(&y, &columns)?);
    }

    let selected = match criterion {
        AutoLag::Aic | AutoLag::Bic => {
            let score = |fit: &OlsFit| match criterion {
                AutoLag::Aic => fit.aic(),
                _ => fit.bic(),
            };
            // strict comparison keeps the smallest lag on ties
            let mut best = (0, score(&fits[0]));
            for (lag, fit) in fits.iter().enumerate().skip(1) {
                let ic = score(fit);
                if ic < best.1 {
                    best = (lag, ic);
                }
            }
            best
        }
        AutoLag::TStat => {
            let mut best = (maxlag, 0.0);
            for lag in (0..=maxlag).rev() {
                let fit = &fits[lag];
                let t = fit.t_value(fit.n_params() - 1).abs();
                best = (lag, t);
                if t >= T_STAT_STOP {
                    break;
                }
            }
            best
        }
    };

    Ok(selected)
}

struct PValueSurface {
    max_stat: f64,
    min_stat: f64,
    star_stat: f64,
    small_p: [f64; 3],
    large_p: [f64; 4],
}

fn p_value_surface(regression: Regression) -> PValueSurface {
    match regression {
        Regression::NoConstant => PValueSurface {
            max_stat: f64::INFINITY,
            min_stat: -19.04,
            star_stat: -1.04,
            small_p: [0.6344, 1.2378, 3.2496e-2],
            large_p: [0.4797, 9.3557e-1, -0.6999e-1, 3.3066e-2],
        },
        Regression::Constant => PValueSurface {
            max_stat: 2.74,
            min_stat: -18.83,
            star_stat: -1.61,
            small_p: [2.1659, 1.4412, 3.8269e-2],
            large_p: [1.7339, 9.3202e-1, -1.2745e-1, -1.0368e-2],
        },
        Regression::ConstantTrend => PValueSurface {
            max_stat: 0.7,
            min_stat: -16.18,
            star_stat: -2.89,
            small_p: [3.2512, 1.6047, 4.9588e-2],
            large_p: [2.5261, 6.1654e-1, -3.7956e-1, -6.0285e-2],
        },
    }
}

/// MacKinnon (1994) approximate p-value for a single-series ADF statistic
pub fn mackinnon_p_value(statistic: f64, regression: Regression) -> f64 {
    let surface = p_value_surface(regression);

    if statistic > surface.max_stat {
        return 1.0;
    }
    if statistic < surface.min_stat {
        return 0.0;
    }

    let z = if statistic <= surface.star_stat {
        polynomial(&surface.small_p, statistic)
    } else {
        polynomial(&surface.large_p, statistic)
    };

    // Normal::new only fails for non-positive or NaN std dev
    Normal::new(0.0, 1.0).map(|n| n.cdf(z)).unwrap_or(f64::NAN)
}

/// MacKinnon (2010) critical values at 1%, 5% and 10% for `nobs` observations
pub fn mackinnon_critical_values(regression: Regression, nobs: usize) -> [f64; 3] {
    let table: [[f64; 4]; 3] = match regression {
        Regression::NoConstant => [
            [-2.56574, -2.2358, -3.627, 0.0],
            [-1.94100, -0.2686, -3.365, 31.223],
            [-1.61682, 0.2656, -2.714, 25.364],
        ],
        Regression::Constant => [
            [-3.43035, -6.5393, -16.786, -79.433],
            [-2.86154, -2.8903, -4.234, -40.040],
            [-2.56677, -1.5384, -2.809, 0.0],
        ],
        Regression::ConstantTrend => [
            [-3.95877, -9.0531, -28.428, -134.155],
            [-3.41049, -4.3904, -9.036, -45.374],
            [-3.12705, -2.5856, -3.925, -22.380],
        ],
    };

    let inv_n = 1.0 / nobs as f64;
    [
        polynomial(&table[0], inv_n),
        polynomial(&table[1], inv_n),
        polynomial(&table[2], inv_n),
    ]
}

/// Evaluate `c[0] + c[1] x + c[2] x^2 + …`
fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
