//! Fitted model state, passed explicitly from `fit` to `forecast`.

use chrono::NaiveDate;

use crate::core::{ForecastResult, SeriesView};
use crate::error::{ForecastError, Result};
use crate::models::exponential::damped_sum;
use crate::transform::FittedTransform;

/// Parameters and final smoothing state of a fitted model.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedState {
    /// Flat forecast at `level` (simple and moving averages).
    Constant { level: f64 },
    /// Holt's linear method with damped trend.
    Holt {
        level: f64,
        trend: f64,
        alpha: f64,
        beta: f64,
        phi: f64,
    },
    /// Additive Holt-Winters. `seasonals[t % period]` is the index for
    /// absolute position `t`; `n` is the number of training observations.
    HoltWinters {
        level: f64,
        trend: f64,
        seasonals: Vec<f64>,
        alpha: f64,
        beta: f64,
        gamma: f64,
        n: usize,
    },
}

impl FittedState {
    /// Model-scale prediction `step` observations after the training window.
    pub fn value_at(&self, step: usize) -> f64 {
        match self {
            FittedState::Constant { level } => *level,
            FittedState::Holt {
                level, trend, phi, ..
            } => level + damped_sum(*phi, step) * trend,
            FittedState::HoltWinters {
                level,
                trend,
                seasonals,
                n,
                ..
            } => {
                let season = seasonals[(n + step - 1) % seasonals.len()];
                level + step as f64 * trend + season
            }
        }
    }
}

/// Output of [`Forecaster::fit`](crate::models::Forecaster::fit).
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    model: String,
    last_date: NaiveDate,
    n_obs: usize,
    state: FittedState,
    transform: FittedTransform,
}

impl FittedModel {
    /// Record the state fitted on `window`, which must not be empty.
    pub fn new(
        model: impl Into<String>,
        window: SeriesView<'_>,
        state: FittedState,
        transform: FittedTransform,
    ) -> Result<Self> {
        let last_date = window
            .last_date()
            .ok_or(ForecastError::InsufficientData { needed: 1, got: 0 })?;

        Ok(Self {
            model: model.into(),
            last_date,
            n_obs: window.len(),
            state,
            transform,
        })
    }

    /// Name of the model that produced this state.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Last date of the training window.
    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Number of training observations.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    pub fn state(&self) -> &FittedState {
        &self.state
    }

    pub fn transform(&self) -> FittedTransform {
        self.transform
    }

    /// Count-scale forecast for steps `1..=horizon`.
    pub fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        (1..=horizon).map(|step| self.value_at(step)).collect()
    }

    /// Forecast for each date in `dates`, placed by its distance in days
    /// from the last training date.
    pub fn forecast_dates(&self, dates: &[NaiveDate]) -> Result<ForecastResult> {
        let values = dates
            .iter()
            .map(|&date| {
                let step = (date - self.last_date).num_days();
                if step < 1 {
                    return Err(ForecastError::Alignment(format!(
                        "{date} is not after the training window ending {}",
                        self.last_date
                    )));
                }
                self.value_at(step as usize)
            })
            .collect::<Result<Vec<f64>>>()?;

        ForecastResult::new(self.model.clone(), dates.to_vec(), values)
    }

    fn value_at(&self, step: usize) -> Result<f64> {
        let value = self.transform.inverse(self.state.value_at(step));
        if !value.is_finite() {
            return Err(ForecastError::ModelFit(format!(
                "{} forecast is undefined {step} steps ahead",
                self.model
            )));
        }
        Ok(value)
    }
}
