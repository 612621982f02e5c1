//! Presentation options for the charts
//!
//! Sizes are in pixels of the SVG canvas.

use serde::{Deserialize, Serialize};
use series_math::decomposition::DecompositionModel;

/// Options for `plot_series`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesPlotOptions {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub size: (u32, u32),
    /// Draw the background mesh
    pub grid: bool,
}

impl Default for SeriesPlotOptions {
    fn default() -> Self {
        Self {
            title: "Time Series".to_string(),
            xlabel: "Time".to_string(),
            ylabel: "Value".to_string(),
            size: (1200, 400),
            grid: true,
        }
    }
}

/// Options for `plot_decomposition`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionPlotOptions {
    pub model: DecompositionModel,
    /// Seasonal period; taken from the series frequency when unset
    pub period: Option<usize>,
    pub size: (u32, u32),
}

impl Default for DecompositionPlotOptions {
    fn default() -> Self {
        Self {
            model: DecompositionModel::Additive,
            period: None,
            size: (1200, 800),
        }
    }
}

/// Options for `plot_rolling_statistics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingPlotOptions {
    pub window: usize,
    pub title: String,
    pub size: (u32, u32),
}

impl Default for RollingPlotOptions {
    fn default() -> Self {
        Self {
            window: 12,
            title: "Rolling Mean & Rolling Std".to_string(),
            size: (1200, 400),
        }
    }
}

/// Options for `plot_acf_pacf_side_by_side`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationPlotOptions {
    /// Largest lag shown
    pub lags: usize,
    /// Significance level of the shaded bands
    pub alpha: f64,
    pub size: (u32, u32),
}

impl Default for CorrelationPlotOptions {
    fn default() -> Self {
        Self {
            lags: 40,
            alpha: 0.05,
            size: (1200, 400),
        }
    }
}
