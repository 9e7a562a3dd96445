//! Core data structures: daily count series and forecasts.

mod daily_series;
mod forecast;

pub use daily_series::{DailySeries, SeriesView};
pub use forecast::ForecastResult;
