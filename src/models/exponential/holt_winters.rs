//! Holt-Winters seasonal forecasting model.
//!
//! Triple exponential smoothing with an additive trend and additive
//! seasonality at a fixed period. With daily counts the natural period is
//! one year.

use tracing::debug;

use crate::core::SeriesView;
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, FittedState, Forecaster};
use crate::transform::TransformSpec;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};

/// One year of daily observations.
pub const ANNUAL_PERIOD: usize = 365;

const PARAM_BOUNDS: (f64, f64) = (0.0001, 0.9999);

/// Additive Holt-Winters forecaster.
///
/// The model equations are:
/// - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(y_t - l_t) + (1-γ)s_{t-m}`
/// - Forecast: `ŷ_{t+h} = l_t + h×b_t + s_{t+h-m}`
///
/// The first season initializes the state; the trend starts at zero unless
/// two full seasons are available.
#[derive(Debug, Clone)]
pub struct HoltWintersSeasonal {
    period: usize,
    transform: TransformSpec,
    optimizer: NelderMeadConfig,
}

impl HoltWintersSeasonal {
    /// Create a model with the given seasonal period.
    pub fn new(period: usize) -> Result<Self> {
        if period < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {period}"
            )));
        }
        Ok(Self {
            period,
            transform: TransformSpec::None,
            optimizer: NelderMeadConfig::default(),
        })
    }

    /// Yearly seasonality on daily data.
    pub fn annual() -> Self {
        Self {
            period: ANNUAL_PERIOD,
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

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    pub fn transform(&self) -> TransformSpec {
        self.transform
    }

    fn estimate(&self, values: &[f64]) -> Result<(f64, f64, f64, f64)> {
        let period = self.period;
        let result = nelder_mead(
            |params| smooth(values, period, params[0], params[1], params[2]).sse,
            &[0.3, 0.1, 0.1],
            Some(&[PARAM_BOUNDS, PARAM_BOUNDS, PARAM_BOUNDS]),
            &self.optimizer,
        );

        if !result.optimal_value.is_finite() {
            return Err(ForecastError::ModelFit(
                "holt_winters_seasonal: smoothing diverged for every candidate".to_string(),
            ));
        }
        if !result.converged {
            return Err(ForecastError::ModelFit(format!(
                "holt_winters_seasonal: parameter search did not converge after {} iterations",
                result.iterations
            )));
        }

        let clamp = |x: f64| x.clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1);
        Ok((
            clamp(result.optimal_point[0]),
            clamp(result.optimal_point[1]),
            clamp(result.optimal_point[2]),
            result.optimal_value,
        ))
    }
}

impl Default for HoltWintersSeasonal {
    fn default() -> Self {
        Self::annual()
    }
}

impl Forecaster for HoltWintersSeasonal {
    fn name(&self) -> &str {
        "holt_winters_seasonal"
    }

    fn fit(&self, window: SeriesView<'_>) -> Result<FittedModel> {
        if window.len() < self.period {
            return Err(ForecastError::ModelFit(format!(
                "holt_winters_seasonal needs one full season of {} observations, got {}",
                self.period,
                window.len()
            )));
        }

        let (transform, values) = self.transform.fit(&window.as_f64())?;
        let (alpha, beta, gamma, sse) = self.estimate(&values)?;
        let state = smooth(&values, self.period, alpha, beta, gamma);

        let finite = state.level.is_finite()
            && state.trend.is_finite()
            && state.seasonals.iter().all(|s| s.is_finite());
        if !finite {
            return Err(ForecastError::ModelFit(
                "holt_winters_seasonal: final state is not finite".to_string(),
            ));
        }

        debug!(
            model = self.name(),
            period = self.period,
            transform = self.transform.name(),
            alpha,
            beta,
            gamma,
            sse,
            "fitted holt-winters"
        );

        FittedModel::new(
            self.name(),
            window,
            FittedState::HoltWinters {
                level: state.level,
                trend: state.trend,
                seasonals: state.seasonals,
                alpha,
                beta,
                gamma,
                n: values.len(),
            },
            transform,
        )
    }
}

struct Smoothed {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    sse: f64,
}

/// Initial level, trend and normalized seasonal indices from the first
/// one or two seasons.
fn initialize_state(values: &[f64], period: usize) -> (f64, f64, Vec<f64>) {
    let first_season = &values[..period];
    let level = first_season.iter().sum::<f64>() / period as f64;

    let trend = if values.len() >= 2 * period {
        let sum: f64 = (0..period)
            .map(|i| (values[period + i] - values[i]) / period as f64)
            .sum();
        sum / period as f64
    } else {
        0.0
    };

    let mut seasonals: Vec<f64> = first_season.iter().map(|y| y - level).collect();
    let adjustment = seasonals.iter().sum::<f64>() / period as f64;
    for s in &mut seasonals {
        *s -= adjustment;
    }

    (level, trend, seasonals)
}

/// Run the additive recursion over everything after the first season.
fn smooth(values: &[f64], period: usize, alpha: f64, beta: f64, gamma: f64) -> Smoothed {
    let (mut level, mut trend, mut seasonals) = initialize_state(values, period);
    let mut sse = 0.0;

    for (t, &y) in values.iter().enumerate().skip(period) {
        let idx = t % period;
        let s = seasonals[idx];

        let error = y - (level + trend + s);
        sse += error * error;

        let level_prev = level;
        level = alpha * (y - s) + (1.0 - alpha) * (level_prev + trend);
        trend = beta * (level - level_prev) + (1.0 - beta) * trend;
        seasonals[idx] = gamma * (y - level) + (1.0 - gamma) * s;
    }

    Smoothed {
        level,
        trend,
        seasonals,
        sse,
    }
}
