//! Forecasting models.
//!
//! Every model implements [`Forecaster`]: `fit` consumes a training window
//! and returns a [`FittedModel`], which `forecast` takes back explicitly.

mod fitted;
mod traits;

pub mod baseline;
pub mod exponential;

pub use fitted::{FittedModel, FittedState};
pub use traits::{BoxedForecaster, Forecaster, ModelRegistry};
