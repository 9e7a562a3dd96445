//! Accuracy metrics over paired actual/predicted slices.

use crate::error::{ForecastError, Result};

fn check_pairs(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    if actual.len() != predicted.len() {
        return Err(ForecastError::Alignment(format!(
            "{} actual values but {} predictions",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Mean squared error.
pub fn mse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pairs(actual, predicted)?;
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Ok(total / actual.len() as f64)
}

/// Root mean squared error, unrounded.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    mse(actual, predicted).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_forecast_has_zero_error() {
        let actual = [3.0, 5.0, 7.0];
        assert_eq!(rmse(&actual, &actual).unwrap(), 0.0);
    }

    #[test]
    fn known_values() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [2.0, 2.0, 2.0, 2.0];
        // squared errors 1, 0, 1, 4
        assert_relative_eq!(mse(&actual, &predicted).unwrap(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(rmse(&actual, &predicted).unwrap(), 1.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn mismatched_lengths_fail() {
        assert!(matches!(
            rmse(&[1.0, 2.0], &[1.0]),
            Err(ForecastError::Alignment(_))
        ));
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(
            mse(&[], &[]),
            Err(ForecastError::InsufficientData { needed: 1, got: 0 })
        ));
    }
}
