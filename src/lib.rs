//! # crime-forecast
//!
//! Daily crime-count forecasting around the 2020 lockdown.
//!
//! Incident CSVs are cleaned and reduced to a daily count series for one
//! crime category, split into train/validate/test windows at fixed calendar
//! boundaries, and scored against a roster of baseline forecasters (simple
//! and moving averages, Holt damped trend, Holt-Winters seasonal) by RMSE.
//! One-sided t-tests compare period means.

pub mod config;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod ingest;
pub mod models;
pub mod split;
pub mod transform;
pub mod utils;
pub mod validation;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::config::{ModelsConfig, PipelineConfig};
    pub use crate::core::{DailySeries, ForecastResult, SeriesView};
    pub use crate::error::{ForecastError, Result};
    pub use crate::evaluation::{Evaluation, Evaluator, ScoreRecord, ScoreTable};
    pub use crate::models::{Forecaster, ModelRegistry};
    pub use crate::split::{split, SplitPolicy, Splits, WindowLabel};
}
