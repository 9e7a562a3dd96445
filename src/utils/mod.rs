//! Utility functions shared by the models, evaluator and statistical tests.

pub mod metrics;
pub mod optimization;
pub mod stats;

pub use metrics::{mse, rmse};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use stats::{mean, variance};
