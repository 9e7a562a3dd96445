//! RMSE scoring and the score table.

use serde::Serialize;

use crate::core::{ForecastResult, SeriesView};
use crate::error::{ForecastError, Result};
use crate::split::WindowLabel;
use crate::utils::metrics;

/// Root mean squared error of `forecast` against the ground truth in
/// `actual`, rounded to whole incidents.
///
/// Every date in `actual` must have a prediction; extra forecast dates
/// are ignored.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use crime_forecast::core::{DailySeries, ForecastResult};
/// use crime_forecast::evaluation::rmse;
///
/// let start = NaiveDate::from_ymd_opt(2021, 3, 16).unwrap();
/// let actual = DailySeries::from_counts(start, vec![4, 6, 4, 6]);
/// let forecast = ForecastResult::constant("flat", actual.dates(), 5.0).unwrap();
///
/// assert_eq!(rmse(actual.view(), &forecast).unwrap(), 1.0);
/// ```
pub fn rmse(actual: SeriesView<'_>, forecast: &ForecastResult) -> Result<f64> {
    if actual.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }

    let predicted = actual
        .dates()
        .iter()
        .map(|&date| {
            forecast.get(date).ok_or_else(|| {
                ForecastError::Alignment(format!(
                    "{} has no prediction for {date}",
                    forecast.model()
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    let error = metrics::rmse(&actual.as_f64(), &predicted)?;
    Ok(error.round())
}

/// One model's score on one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    #[serde(rename = "model_name")]
    pub model: String,
    #[serde(rename = "window_name")]
    pub window: WindowLabel,
    pub rmse: f64,
}

impl ScoreRecord {
    pub fn new(model: impl Into<String>, window: WindowLabel, rmse: f64) -> Self {
        Self {
            model: model.into(),
            window,
            rmse,
        }
    }
}

/// Scores in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    records: Vec<ScoreRecord>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Score of `model` on `window`.
    pub fn get(&self, model: &str, window: WindowLabel) -> Option<&ScoreRecord> {
        self.records
            .iter()
            .find(|r| r.model == model && r.window == window)
    }

    /// Lowest-RMSE record for `window`; the earliest wins ties.
    pub fn best_for(&self, window: WindowLabel) -> Option<&ScoreRecord> {
        self.records
            .iter()
            .filter(|r| r.window == window)
            .fold(None, |best: Option<&ScoreRecord>, r| match best {
                Some(b) if b.rmse <= r.rmse => Some(b),
                _ => Some(r),
            })
    }
}

impl<'a> IntoIterator for &'a ScoreTable {
    type Item = &'a ScoreRecord;
    type IntoIter = std::slice::Iter<'a, ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
