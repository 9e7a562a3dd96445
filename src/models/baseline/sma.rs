//! Average-based forecasting models.
//!
//! This module provides:
//! - `SimpleAverage`: Forecasts using the mean of the whole training window
//! - `MovingAverage`: Forecasts using the mean of the last `period` observations

use tracing::debug;

use crate::core::SeriesView;
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, FittedState, Forecaster};
use crate::transform::FittedTransform;

/// Short moving-average window, in days.
pub const SHORT_WINDOW: usize = 30;
/// Long moving-average window, in days.
pub const LONG_WINDOW: usize = 90;

/// Simple average forecaster.
///
/// Predicts every future value as the mean count of the training window.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use crime_forecast::core::DailySeries;
/// use crime_forecast::models::baseline::SimpleAverage;
/// use crime_forecast::models::Forecaster;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let series = DailySeries::from_counts(start, (1..=10).collect());
///
/// let model = SimpleAverage::new();
/// let fitted = model.fit(series.view()).unwrap();
/// // All predictions are 5.5 (mean of 1..=10)
/// assert_eq!(model.forecast(&fitted, 3).unwrap(), vec![5.5; 3]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAverage;

impl SimpleAverage {
    pub fn new() -> Self {
        Self
    }
}

impl Forecaster for SimpleAverage {
    fn name(&self) -> &str {
        "simple_average"
    }

    fn fit(&self, window: SeriesView<'_>) -> Result<FittedModel> {
        let level = window
            .mean()
            .ok_or(ForecastError::InsufficientData { needed: 1, got: 0 })?;

        debug!(model = self.name(), n = window.len(), level, "fitted average");

        FittedModel::new(
            self.name(),
            window,
            FittedState::Constant { level },
            FittedTransform::Identity,
        )
    }
}

/// Moving average forecaster.
///
/// Predicts every future value as the mean of the last `period`
/// observations of the training window.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    period: usize,
    name: String,
}

impl MovingAverage {
    /// Create a moving average over `period` observations.
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(ForecastError::InvalidParameter(
                "moving average period must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            period,
            name: format!("moving_average_{period}d"),
        })
    }

    /// The 30-day moving average.
    pub fn short() -> Self {
        Self {
            period: SHORT_WINDOW,
            name: format!("moving_average_{SHORT_WINDOW}d"),
        }
    }

    /// The 90-day moving average.
    pub fn long() -> Self {
        Self {
            period: LONG_WINDOW,
            name: format!("moving_average_{LONG_WINDOW}d"),
        }
    }

    /// Get the window size.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Forecaster for MovingAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn fit(&self, window: SeriesView<'_>) -> Result<FittedModel> {
        if window.len() < self.period {
            return Err(ForecastError::InsufficientData {
                needed: self.period,
                got: window.len(),
            });
        }

        let tail = window.tail(self.period);
        let level = tail
            .mean()
            .ok_or(ForecastError::InsufficientData { needed: 1, got: 0 })?;

        debug!(model = self.name(), period = self.period, level, "fitted moving average");

        FittedModel::new(
            self.name(),
            window,
            FittedState::Constant { level },
            FittedTransform::Identity,
        )
    }
}
