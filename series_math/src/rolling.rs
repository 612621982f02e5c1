//! Rolling-window statistics over series with missing points
//!
//! A window yields a value only once it holds `period` points and none of
//! them is missing.

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Fixed-length window that tracks its sum and missing count
#[derive(Debug, Clone)]
pub struct RollingWindow {
    period: usize,
    values: VecDeque<Option<f64>>,
    sum: f64,
    missing: usize,
}

impl RollingWindow {
    /// Create a new window with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Window size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
            sum: 0.0,
            missing: 0,
        })
    }

    /// Push a new point, evicting the oldest one when the window is full
    pub fn update(&mut self, value: Option<f64>) {
        self.add(value);

        if self.values.len() > self.period {
            if let Some(old) = self.values.pop_front() {
                self.remove(old);
            }
        }
    }

    fn add(&mut self, value: Option<f64>) {
        match value {
            Some(v) => self.sum += v,
            None => self.missing += 1,
        }
        self.values.push_back(value);
    }

    fn remove(&mut self, value: Option<f64>) {
        match value {
            Some(v) => self.sum -= v,
            None => self.missing -= 1,
        }
    }

    fn is_complete(&self) -> bool {
        self.values.len() == self.period && self.missing == 0
    }

    /// Mean of the window
    pub fn mean(&self) -> Option<f64> {
        self.is_complete().then(|| self.sum / self.period as f64)
    }

    /// Sample standard deviation (denominator `period - 1`) of the window
    pub fn std_dev(&self) -> Option<f64> {
        if !self.is_complete() || self.period < 2 {
            return None;
        }
        let mean = self.sum / self.period as f64;
        let ss: f64 = self
            .values
            .iter()
            .flatten()
            .map(|v| (v - mean).powi(2))
            .sum();
        Some((ss / (self.period - 1) as f64).sqrt())
    }
}

fn roll<F>(values: &[Option<f64>], window: usize, stat: F) -> Result<Vec<Option<f64>>>
where
    F: Fn(&RollingWindow) -> Option<f64>,
{
    let mut rolling = RollingWindow::new(window)?;
    Ok(values
        .iter()
        .map(|v| {
            rolling.update(*v);
            stat(&rolling)
        })
        .collect())
}

/// Rolling mean aligned to the right edge of each window
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Result<Vec<Option<f64>>> {
    roll(values, window, RollingWindow::mean)
}

/// Rolling sample standard deviation aligned to the right edge of each window
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Result<Vec<Option<f64>>> {
    roll(values, window, RollingWindow::std_dev)
}
