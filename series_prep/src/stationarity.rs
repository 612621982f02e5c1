//! Augmented Dickey-Fuller stationarity test on a `TimeSeries`

use crate::data::TimeSeries;
use crate::error::{Result, SeriesError};
use series_math::unit_root::{adfuller, AutoLag, Regression, CRITICAL_LEVELS};
use series_math::MathError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Options for `adfuller_test_with`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdfOptions {
    /// Significance level for the stationarity verdict
    pub alpha: f64,
    /// Lag selection criterion; `None` uses `maxlag` as is
    pub autolag: Option<AutoLag>,
    pub regression: Regression,
    /// Largest lag considered; derived from the sample size when unset
    pub maxlag: Option<usize>,
    /// Print a summary to stdout
    pub verbose: bool,
}

impl Default for AdfOptions {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            autolag: Some(AutoLag::Aic),
            regression: Regression::default(),
            maxlag: None,
            verbose: false,
        }
    }
}

/// Critical values of the test statistic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalValues {
    #[serde(rename = "1%")]
    pub one_percent: f64,
    #[serde(rename = "5%")]
    pub five_percent: f64,
    #[serde(rename = "10%")]
    pub ten_percent: f64,
}

impl CriticalValues {
    /// (label, value) pairs from the strictest level down
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        CRITICAL_LEVELS
            .into_iter()
            .zip([self.one_percent, self.five_percent, self.ten_percent])
    }
}

/// Result of the augmented Dickey-Fuller test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdfResult {
    pub test_statistic: f64,
    pub p_value: f64,
    /// Lagged differences in the final regression
    pub used_lag: usize,
    /// Observations in the final regression
    pub n_obs: usize,
    pub critical_values: CriticalValues,
    /// `p_value < alpha`
    pub is_stationary: bool,
    pub alpha: f64,
    /// Best information criterion when a lag was selected automatically
    pub ic_best: Option<f64>,
}

impl fmt::Display for AdfResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Augmented Dickey-Fuller test ===")?;
        writeln!(f, "Test statistic: {:.4}", self.test_statistic)?;
        writeln!(f, "p-value: {:.4}", self.p_value)?;
        writeln!(f, "Lags used: {}", self.used_lag)?;
        writeln!(f, "Observations: {}", self.n_obs)?;
        writeln!(f, "Critical values:")?;
        for (level, value) in self.critical_values.iter() {
            writeln!(f, "  {}: {:.4}", level, value)?;
        }
        writeln!(f, "-----------------------------------")?;
        if self.is_stationary {
            writeln!(f, "Conclusion: reject H0 at the {} level.", self.alpha)?;
            write!(f, "The series can be considered stationary.")
        } else {
            writeln!(f, "Conclusion: fail to reject H0 at the {} level.", self.alpha)?;
            write!(f, "The series can NOT be considered stationary.")
        }
    }
}

fn data_error(err: MathError) -> SeriesError {
    match err {
        MathError::InsufficientData(msg) | MathError::InvalidInput(msg) => {
            SeriesError::InvalidData(msg)
        }
        other => SeriesError::MathError(other),
    }
}

/// Run the test with the default regression (constant) and lag bound
pub fn adfuller_test(
    series: &TimeSeries,
    alpha: f64,
    autolag: Option<AutoLag>,
    verbose: bool,
) -> Result<AdfResult> {
    adfuller_test_with(
        series,
        &AdfOptions {
            alpha,
            autolag,
            verbose,
            ..AdfOptions::default()
        },
    )
}

/// Run the test on the present values of `series`
pub fn adfuller_test_with(series: &TimeSeries, options: &AdfOptions) -> Result<AdfResult> {
    let alpha = options.alpha;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(SeriesError::InvalidParameter(format!(
            "alpha must be between 0 and 1, got {}",
            alpha
        )));
    }

    let values = series.observed_values();
    let outcome = adfuller(&values, options.maxlag, options.regression, options.autolag)
        .map_err(data_error)?;
    debug!(
        statistic = outcome.statistic,
        p_value = outcome.p_value,
        used_lag = outcome.used_lag,
        "adf test"
    );

    let [one, five, ten] = outcome.critical_values;
    let result = AdfResult {
        test_statistic: outcome.statistic,
        p_value: outcome.p_value,
        used_lag: outcome.used_lag,
        n_obs: outcome.n_obs,
        critical_values: CriticalValues {
            one_percent: one,
            five_percent: five,
            ten_percent: ten,
        },
        is_stationary: outcome.p_value < alpha,
        alpha,
        ic_best: outcome.ic_best,
    };

    if options.verbose {
        println!("{}", result);
    }
    Ok(result)
}
