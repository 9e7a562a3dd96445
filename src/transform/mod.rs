//! Variance-stabilizing transforms for the exponential smoothing models.
//!
//! A [`TransformSpec`] is configuration; fitting it against training data
//! yields a [`FittedTransform`] that maps counts onto the model scale and
//! forecasts back onto the count scale.

pub mod boxcox;

pub use boxcox::{boxcox, boxcox_lambda, inv_boxcox_value, is_boxcox_suitable};

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Transform requested for a model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformSpec {
    /// Model the raw counts.
    #[default]
    None,
    /// Natural log; requires strictly positive data.
    Log,
    /// Box-Cox with a fixed lambda, or a maximum-likelihood estimate when
    /// `lambda` is `None`. Requires strictly positive data.
    BoxCox {
        #[serde(default)]
        lambda: Option<f64>,
    },
}

/// A transform resolved against training data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FittedTransform {
    Identity,
    BoxCox { lambda: f64 },
}

impl TransformSpec {
    /// Resolve the transform for `values` and return the transformed data.
    ///
    /// Fails with [`ForecastError::ModelFit`] when the transform is undefined
    /// for the data. No fallback transform is substituted.
    pub fn fit(&self, values: &[f64]) -> Result<(FittedTransform, Vec<f64>)> {
        if *self == TransformSpec::None {
            return Ok((FittedTransform::Identity, values.to_vec()));
        }
        if !is_boxcox_suitable(values) {
            return Err(self.undefined());
        }

        let lambda = match *self {
            TransformSpec::BoxCox { lambda: Some(lambda) } => lambda,
            TransformSpec::BoxCox { lambda: None } => boxcox_lambda(values),
            TransformSpec::Log | TransformSpec::None => 0.0,
        };

        let transformed = boxcox(values, lambda);
        if transformed.iter().any(|v| !v.is_finite()) {
            return Err(self.undefined());
        }

        Ok((FittedTransform::BoxCox { lambda }, transformed))
    }

    fn undefined(&self) -> ForecastError {
        ForecastError::ModelFit(format!(
            "{} transform requires strictly positive data",
            self.name()
        ))
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransformSpec::None => "identity",
            TransformSpec::Log => "log",
            TransformSpec::BoxCox { .. } => "box-cox",
        }
    }
}

impl FittedTransform {
    /// Map a model-scale value back onto the count scale.
    pub fn inverse(&self, value: f64) -> f64 {
        match self {
            FittedTransform::Identity => value,
            FittedTransform::BoxCox { lambda } => inv_boxcox_value(value, *lambda),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_passes_zeros_through() {
        let (fitted, data) = TransformSpec::None.fit(&[0.0, 1.0, 2.0]).unwrap();
        assert_eq!(fitted, FittedTransform::Identity);
        assert_eq!(data, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn log_rejects_zero_counts() {
        let result = TransformSpec::Log.fit(&[0.0, 0.0, 0.0]);
        assert!(matches!(result, Err(ForecastError::ModelFit(_))));
    }

    #[test]
    fn boxcox_rejects_non_positive_counts() {
        let result = TransformSpec::BoxCox { lambda: None }.fit(&[3.0, 0.0, 5.0]);
        assert!(matches!(result, Err(ForecastError::ModelFit(_))));

        let result = TransformSpec::BoxCox { lambda: Some(0.5) }.fit(&[3.0, 0.0, 5.0]);
        assert!(matches!(result, Err(ForecastError::ModelFit(_))));
    }

    #[test]
    fn log_round_trips() {
        let values = [2.0, 4.0, 8.0];
        let (fitted, data) = TransformSpec::Log.fit(&values).unwrap();
        assert_eq!(fitted, FittedTransform::BoxCox { lambda: 0.0 });
        for (orig, t) in values.iter().zip(data.iter()) {
            assert_relative_eq!(fitted.inverse(*t), *orig, epsilon = 1e-10);
        }
    }

    #[test]
    fn fixed_lambda_is_kept() {
        let (fitted, _) = TransformSpec::BoxCox { lambda: Some(0.5) }
            .fit(&[1.0, 4.0, 9.0])
            .unwrap();
        assert_eq!(fitted, FittedTransform::BoxCox { lambda: 0.5 });
    }

    #[test]
    fn spec_deserializes() {
        let spec: TransformSpec = serde_json::from_str(r#"{"kind":"box_cox"}"#).unwrap();
        assert_eq!(spec, TransformSpec::BoxCox { lambda: None });
        let spec: TransformSpec = serde_json::from_str(r#"{"kind":"log"}"#).unwrap();
        assert_eq!(spec, TransformSpec::Log);
    }
}
