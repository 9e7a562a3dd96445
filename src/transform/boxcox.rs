//! Box-Cox power transformation.
//!
//! Stabilizes the variance of count data before exponential smoothing.

/// Apply Box-Cox transformation with a given lambda.
///
/// For lambda != 0: y = (x^lambda - 1) / lambda
/// For lambda == 0: y = ln(x)
///
/// Returns NaN for non-positive values.
pub fn boxcox(series: &[f64], lambda: f64) -> Vec<f64> {
    series.iter().map(|&x| boxcox_value(x, lambda)).collect()
}

fn boxcox_value(x: f64, lambda: f64) -> f64 {
    if x <= 0.0 {
        f64::NAN
    } else if lambda.abs() < 1e-10 {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    }
}

/// Inverse Box-Cox transformation of a single value.
///
/// For lambda != 0: x = (lambda * y + 1)^(1/lambda)
/// For lambda == 0: x = exp(y)
pub fn inv_boxcox_value(y: f64, lambda: f64) -> f64 {
    if lambda.abs() < 1e-10 {
        y.exp()
    } else {
        let val = lambda * y + 1.0;
        if val <= 0.0 {
            f64::NAN
        } else {
            val.powf(1.0 / lambda)
        }
    }
}

/// Find the Box-Cox lambda maximizing the profile log-likelihood.
///
/// Grid search over [-2, 2] in steps of 0.01, then a finer pass around
/// the best value. Expects strictly positive data; returns 1.0 when the
/// likelihood is undefined everywhere (e.g. a constant series).
pub fn boxcox_lambda(series: &[f64]) -> f64 {
    if series.windows(2).all(|w| w[0] == w[1]) {
        return 1.0;
    }

    let mut best_lambda = 1.0;
    let mut best_llf = f64::NEG_INFINITY;

    for i in -200..=200 {
        let lambda = i as f64 / 100.0;
        let llf = boxcox_llf(series, lambda);

        if llf > best_llf {
            best_llf = llf;
            best_lambda = lambda;
        }
    }

    let start = (best_lambda - 0.01).max(-2.0);
    let end = (best_lambda + 0.01).min(2.0);

    for i in 0..=100 {
        let lambda = start + (end - start) * i as f64 / 100.0;
        let llf = boxcox_llf(series, lambda);

        if llf > best_llf {
            best_llf = llf;
            best_lambda = lambda;
        }
    }

    best_lambda
}

/// Log-likelihood of the transformed data being normal (constant terms dropped).
fn boxcox_llf(series: &[f64], lambda: f64) -> f64 {
    let n = series.len();
    if n < 2 {
        return f64::NEG_INFINITY;
    }

    let transformed = boxcox(series, lambda);
    if transformed.iter().any(|x| !x.is_finite()) {
        return f64::NEG_INFINITY;
    }

    let mean = transformed.iter().sum::<f64>() / n as f64;
    let variance = transformed.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

    // Rounding noise on near-constant data is not spread.
    if variance <= f64::EPSILON * mean.abs().max(1.0).powi(2) {
        return f64::NEG_INFINITY;
    }

    let log_sum: f64 = series.iter().map(|x| x.ln()).sum();

    -0.5 * n as f64 * variance.ln() + (lambda - 1.0) * log_sum
}

/// True if all values are strictly positive.
pub fn is_boxcox_suitable(series: &[f64]) -> bool {
    !series.is_empty() && series.iter().all(|&x| x > 0.0)
}
