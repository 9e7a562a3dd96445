//! Holt's linear trend model with a damped trend.
//!
//! Also known as double exponential smoothing, this model is suitable for
//! data with a trend but no seasonality.

use tracing::debug;

use crate::core::SeriesView;
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, FittedState, Forecaster};
use crate::transform::TransformSpec;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};

const ALPHA_BOUNDS: (f64, f64) = (0.0001, 0.9999);
const BETA_BOUNDS: (f64, f64) = (0.0001, 0.9999);
const PHI_BOUNDS: (f64, f64) = (0.8, 0.98);

/// Holt's linear trend forecaster with damping.
///
/// The model equations are:
/// - Level: `l_t = α × y_t + (1-α) × (l_{t-1} + φ × b_{t-1})`
/// - Trend: `b_t = β × (l_t - l_{t-1}) + (1-β) × φ × b_{t-1}`
/// - Forecast: `ŷ_{t+h} = l_t + (φ + φ² + ... + φ^h) × b_t`
///
/// `α`, `β` and `φ` are chosen by minimizing the one-step-ahead squared
/// error over the training window.
#[derive(Debug, Clone)]
pub struct HoltLinear {
    transform: TransformSpec,
    optimizer: NelderMeadConfig,
}

impl HoltLinear {
    /// Create a Holt model on the raw counts.
    pub fn new() -> Self {
        Self {
            transform: TransformSpec::None,
            optimizer: NelderMeadConfig::default(),
        }
    }

    /// Fit on transformed counts.
    pub fn with_transform(mut self, transform: TransformSpec) -> Self {
        self.transform = transform;
        self
    }

    /// Override the parameter search settings.
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn transform(&self) -> TransformSpec {
        self.transform
    }

    fn estimate(&self, values: &[f64]) -> Result<(f64, f64, f64, f64)> {
        let result = nelder_mead(
            |params| smooth(values, params[0], params[1], params[2]).sse,
            &[0.3, 0.1, 0.9],
            Some(&[ALPHA_BOUNDS, BETA_BOUNDS, PHI_BOUNDS]),
            &self.optimizer,
        );

        if !result.optimal_value.is_finite() {
            return Err(ForecastError::ModelFit(
                "holt_linear: smoothing diverged for every candidate".to_string(),
            ));
        }
        if !result.converged {
            return Err(ForecastError::ModelFit(format!(
                "holt_linear: parameter search did not converge after {} iterations",
                result.iterations
            )));
        }

        let alpha = result.optimal_point[0].clamp(ALPHA_BOUNDS.0, ALPHA_BOUNDS.1);
        let beta = result.optimal_point[1].clamp(BETA_BOUNDS.0, BETA_BOUNDS.1);
        let phi = result.optimal_point[2].clamp(PHI_BOUNDS.0, PHI_BOUNDS.1);
        Ok((alpha, beta, phi, result.optimal_value))
    }
}

impl Default for HoltLinear {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster for HoltLinear {
    fn name(&self) -> &str {
        "holt_linear"
    }

    fn fit(&self, window: SeriesView<'_>) -> Result<FittedModel> {
        if window.len() < 3 {
            return Err(ForecastError::InsufficientData {
                needed: 3,
                got: window.len(),
            });
        }

        let (transform, values) = self.transform.fit(&window.as_f64())?;
        let (alpha, beta, phi, sse) = self.estimate(&values)?;
        let state = smooth(&values, alpha, beta, phi);

        if !state.level.is_finite() || !state.trend.is_finite() {
            return Err(ForecastError::ModelFit(
                "holt_linear: final state is not finite".to_string(),
            ));
        }

        debug!(
            model = self.name(),
            transform = self.transform.name(),
            alpha,
            beta,
            phi,
            sse,
            "fitted holt"
        );

        FittedModel::new(
            self.name(),
            window,
            FittedState::Holt {
                level: state.level,
                trend: state.trend,
                alpha,
                beta,
                phi,
            },
            transform,
        )
    }
}

struct Smoothed {
    level: f64,
    trend: f64,
    sse: f64,
}

/// Run the damped recursion from `l_0 = y_0`, `b_0 = y_1 - y_0`.
fn smooth(values: &[f64], alpha: f64, beta: f64, phi: f64) -> Smoothed {
    let mut level = values[0];
    let mut trend = values[1] - values[0];
    let mut sse = 0.0;

    for &y in values.iter().skip(1) {
        let error = y - (level + phi * trend);
        sse += error * error;

        let level_prev = level;
        level = alpha * y + (1.0 - alpha) * (level_prev + phi * trend);
        trend = beta * (level - level_prev) + (1.0 - beta) * phi * trend;
    }

    Smoothed { level, trend, sse }
}

/// Damped sum `φ + φ² + ... + φ^h`.
pub(crate) fn damped_sum(phi: f64, h: usize) -> f64 {
    if (phi - 1.0).abs() < 1e-10 {
        h as f64
    } else {
        phi * (1.0 - phi.powi(h as i32)) / (1.0 - phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DailySeries;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(values: Vec<u64>) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        DailySeries::from_counts(start, values)
    }

    #[test]
    fn damped_sum_matches_definition() {
        assert_relative_eq!(damped_sum(1.0, 5), 5.0);
        let phi: f64 = 0.9;
        let direct: f64 = (1..=4).map(|k| phi.powi(k)).sum();
        assert_relative_eq!(damped_sum(phi, 4), direct, epsilon = 1e-12);
    }

    #[test]
    fn constant_series_forecasts_constant() {
        let series = make_series(vec![7; 60]);
        let model = HoltLinear::new();
        let fitted = model.fit(series.view()).unwrap();

        for pred in model.forecast(&fitted, 10).unwrap() {
            assert_relative_eq!(pred, 7.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn follows_linear_trend() {
        let series = make_series((0..50).map(|i| 10 + 2 * i).collect());
        let model = HoltLinear::new();
        let fitted = model.fit(series.view()).unwrap();

        let forecast = model.forecast(&fitted, 5).unwrap();
        assert!(forecast[0] > 105.0);
        assert!(forecast.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn parameters_stay_in_bounds() {
        let series = make_series(vec![5, 9, 4, 12, 6, 8, 15, 3, 9, 11, 7, 10]);
        let fitted = HoltLinear::new().fit(series.view()).unwrap();

        match fitted.state() {
            FittedState::Holt {
                alpha, beta, phi, ..
            } => {
                assert!((ALPHA_BOUNDS.0..=ALPHA_BOUNDS.1).contains(alpha));
                assert!((BETA_BOUNDS.0..=BETA_BOUNDS.1).contains(beta));
                assert!((PHI_BOUNDS.0..=PHI_BOUNDS.1).contains(phi));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn unconverged_search_is_a_fit_error() {
        let series = make_series((0..120).map(|i| 10 + (i * 7 % 13) + i / 10).collect());
        let model = HoltLinear::new().with_optimizer(NelderMeadConfig {
            max_iter: 3,
            ..NelderMeadConfig::default()
        });
        assert!(matches!(
            model.fit(series.view()),
            Err(ForecastError::ModelFit(_))
        ));
        assert!(HoltLinear::new().fit(series.view()).is_ok());
    }

    #[test]
    fn trend_is_always_damped() {
        let series = make_series((0..50).map(|i| 10 + 2 * i).collect());
        let fitted = HoltLinear::new().fit(series.view()).unwrap();
        match fitted.state() {
            FittedState::Holt { phi, .. } => assert!(*phi < 1.0),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn refit_is_deterministic() {
        let series = make_series(vec![5, 9, 4, 12, 6, 8, 15, 3, 9, 11, 7, 10]);
        let model = HoltLinear::new();
        let a = model.fit(series.view()).unwrap();
        let b = model.fit(series.view()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn requires_three_observations() {
        let series = make_series(vec![1, 2]);
        assert!(matches!(
            HoltLinear::new().fit(series.view()),
            Err(ForecastError::InsufficientData { needed: 3, got: 2 })
        ));
    }

    #[test]
    fn log_transform_rejects_zero_counts() {
        let series = make_series(vec![3, 0, 4, 5, 6]);
        let model = HoltLinear::new().with_transform(TransformSpec::Log);
        assert!(matches!(
            model.fit(series.view()),
            Err(ForecastError::ModelFit(_))
        ));
    }

    #[test]
    fn log_transform_forecasts_on_count_scale() {
        let series = make_series(vec![20; 30]);
        let model = HoltLinear::new().with_transform(TransformSpec::Log);
        let fitted = model.fit(series.view()).unwrap();

        for pred in model.forecast(&fitted, 3).unwrap() {
            assert_relative_eq!(pred, 20.0, epsilon = 1e-6);
        }
    }
}
