//! Forecaster trait defining the common interface for all baselines.

use chrono::NaiveDate;

use crate::config::ModelsConfig;
use crate::core::{ForecastResult, SeriesView};
use crate::error::{ForecastError, Result};
use crate::models::baseline::{MovingAverage, SimpleAverage};
use crate::models::exponential::{HoltLinear, HoltWintersSeasonal};
use crate::models::FittedModel;

/// Common interface for all forecasting models.
///
/// Forecasters hold configuration only. `fit` returns the fitted state as a
/// value and `forecast` takes it back explicitly, so one forecaster can be
/// shared across windows and threads.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster: Send + Sync {
    /// Name used in score tables.
    fn name(&self) -> &str;

    /// Fit the model to a training window.
    fn fit(&self, window: SeriesView<'_>) -> Result<FittedModel>;

    /// Forecast `horizon` consecutive steps after the training window.
    fn forecast(&self, fitted: &FittedModel, horizon: usize) -> Result<Vec<f64>> {
        self.check_owner(fitted)?;
        fitted.predict(horizon)
    }

    /// Forecast each of `dates`, aligned by calendar distance from the end
    /// of the training window.
    fn forecast_dates(&self, fitted: &FittedModel, dates: &[NaiveDate]) -> Result<ForecastResult> {
        self.check_owner(fitted)?;
        fitted.forecast_dates(dates)
    }

    /// Reject state fitted by a different model.
    fn check_owner(&self, fitted: &FittedModel) -> Result<()> {
        if fitted.model() != self.name() {
            return Err(ForecastError::InvalidParameter(format!(
                "{} cannot forecast from state fitted by {}",
                self.name(),
                fitted.model()
            )));
        }
        Ok(())
    }
}

/// Type alias for boxed forecaster trait objects.
///
/// # Example
///
/// ```
/// use crime_forecast::models::{BoxedForecaster, Forecaster};
/// use crime_forecast::models::baseline::SimpleAverage;
///
/// let model: BoxedForecaster = Box::new(SimpleAverage::new());
/// assert_eq!(model.name(), "simple_average");
/// ```
pub type BoxedForecaster = Box<dyn Forecaster>;

/// Ordered collection of forecasters evaluated together.
///
/// Registration order is the order of rows in the score table.
#[derive(Default)]
pub struct ModelRegistry {
    models: Vec<BoxedForecaster>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// The standard roster: simple average, short and long moving
    /// averages, Holt damped trend, Holt-Winters seasonal.
    pub fn baselines(config: &ModelsConfig) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(SimpleAverage::new());
        registry.register(MovingAverage::new(config.short_window)?);
        registry.register(MovingAverage::new(config.long_window)?);
        registry.register(HoltLinear::new().with_transform(config.holt_transform));
        registry.register(
            HoltWintersSeasonal::new(config.seasonal_period)?
                .with_transform(config.seasonal_transform),
        );
        Ok(registry)
    }

    /// Register a forecaster.
    pub fn register<F: Forecaster + 'static>(&mut self, model: F) {
        self.models.push(Box::new(model));
    }

    /// Get the number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate over forecasters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Forecaster> {
        self.models.iter().map(|m| m.as_ref())
    }

    /// Model names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DailySeries;
    use chrono::NaiveDate;

    fn make_series(n: usize) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        DailySeries::from_counts(start, (1..=n as u64).collect())
    }

    #[test]
    fn boxed_forecaster_fit_forecast() {
        let model: BoxedForecaster = Box::new(SimpleAverage::new());
        let series = make_series(20);

        let fitted = model.fit(series.view()).unwrap();
        let forecast = model.forecast(&fitted, 5).unwrap();
        assert_eq!(forecast.len(), 5);
    }

    #[test]
    fn forecast_rejects_foreign_state() {
        let series = make_series(40);
        let average = SimpleAverage::new();
        let moving = MovingAverage::new(7).unwrap();

        let fitted = moving.fit(series.view()).unwrap();
        assert!(matches!(
            average.forecast(&fitted, 3),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn baseline_roster_order() {
        let registry = ModelRegistry::baselines(&ModelsConfig::default()).unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "simple_average",
                "moving_average_30d",
                "moving_average_90d",
                "holt_linear",
                "holt_winters_seasonal",
            ]
        );
    }

    #[test]
    fn registry_rejects_zero_window() {
        let config = ModelsConfig {
            short_window: 0,
            ..ModelsConfig::default()
        };
        assert!(ModelRegistry::baselines(&config).is_err());
    }

    #[test]
    fn model_registry_default_is_empty() {
        let registry = ModelRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_iterates_in_registration_order() {
        let mut registry = ModelRegistry::new();
        registry.register(MovingAverage::new(3).unwrap());
        registry.register(SimpleAverage::new());

        let series = make_series(10);
        let forecasts: Vec<Vec<f64>> = registry
            .iter()
            .map(|model| {
                let fitted = model.fit(series.view()).unwrap();
                model.forecast(&fitted, 2).unwrap()
            })
            .collect();

        assert_eq!(forecasts[0], vec![9.0, 9.0]);
        assert_eq!(forecasts[1], vec![5.5, 5.5]);
    }
}
