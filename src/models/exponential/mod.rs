//! Exponential smoothing models.
//!
//! This module provides:
//! - Holt's linear method with a damped trend
//! - Holt-Winters with additive trend and additive seasonality

mod holt;
mod holt_winters;

pub(crate) use holt::damped_sum;
pub use holt::HoltLinear;
pub use holt_winters::{HoltWintersSeasonal, ANNUAL_PERIOD};
