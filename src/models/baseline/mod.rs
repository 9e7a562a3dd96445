//! Baseline forecasting models.
//!
//! Flat forecasts that serve as the comparison floor for the smoothing models.

mod sma;

pub use sma::{MovingAverage, SimpleAverage, LONG_WINDOW, SHORT_WINDOW};
