//! Forecast result structure for holding date-aligned predictions.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// Point predictions for a target window, one value per date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastResult {
    /// Name of the model that produced the predictions.
    model: String,
    /// Target dates, strictly increasing.
    dates: Vec<NaiveDate>,
    /// Predicted counts aligned with `dates`.
    values: Vec<f64>,
}

impl ForecastResult {
    /// Create a forecast from parallel date and value vectors.
    pub fn new(model: impl Into<String>, dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::Alignment(format!(
                "{} forecast dates but {} values",
                dates.len(),
                values.len()
            )));
        }
        if dates.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ForecastError::Alignment(
                "forecast dates must be strictly increasing".to_string(),
            ));
        }

        Ok(Self {
            model: model.into(),
            dates,
            values,
        })
    }

    /// Repeat a single value for every target date.
    pub fn constant(model: impl Into<String>, dates: &[NaiveDate], value: f64) -> Result<Self> {
        Self::new(model, dates.to_vec(), vec![value; dates.len()])
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the forecast horizon (number of dates).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Prediction for `date`, if it is part of the forecast.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}
