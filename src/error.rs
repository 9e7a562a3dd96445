//! Error types for the crime-forecast library.

use thiserror::Error;

/// Result type alias for splitting, forecasting and evaluation.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors raised by the windowing, forecasting and evaluation pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Split boundaries are invalid for the series.
    #[error("invalid window: {0}")]
    InvalidWindow(String),

    /// The window is too short for the requested model.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Model fitting failed (divergence, undefined transform, too few cycles).
    #[error("model fit failed: {0}")]
    ModelFit(String),

    /// Forecast dates do not cover the ground truth dates.
    #[error("alignment error: {0}")]
    Alignment(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Degenerate numeric computation (e.g. zero standard error).
    #[error("computation error: {0}")]
    Computation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::InvalidWindow("train_end 2030-01-01 is after the series".into());
        assert_eq!(
            err.to_string(),
            "invalid window: train_end 2030-01-01 is after the series"
        );

        let err = ForecastError::InsufficientData { needed: 90, got: 12 };
        assert_eq!(err.to_string(), "insufficient data: need at least 90, got 12");

        let err = ForecastError::ModelFit("log transform requires positive data".into());
        assert_eq!(
            err.to_string(),
            "model fit failed: log transform requires positive data"
        );

        let err = ForecastError::Alignment("missing 2020-01-02".into());
        assert_eq!(err.to_string(), "alignment error: missing 2020-01-02");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::InsufficientData { needed: 3, got: 1 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
