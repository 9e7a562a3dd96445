//! One-sided t-tests comparing the mean daily count of two periods.
//!
//! Used to check whether a sub-period (e.g. the lockdown year) has a higher
//! mean than a reference period.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{ForecastError, Result};
use crate::utils::stats::{mean, variance};

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// One-sample t-test result.
#[derive(Debug, Clone, PartialEq)]
pub struct OneSampleResult {
    /// Test statistic t
    pub t_statistic: f64,
    /// One-sided p-value, `P(T >= t)`
    pub p_value: f64,
    /// Whether `p_value < alpha`
    pub significant: bool,
}

/// Welch two-sample t-test result.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoSampleResult {
    /// Test statistic t
    pub t_statistic: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
    /// One-sided p-value, `P(T >= t)`
    pub p_value: f64,
    /// Whether `mean(A) <= mean(B)` is rejected at the given alpha
    pub reject_null: bool,
    /// Human-readable conclusion
    pub verdict: String,
}

/// Test whether the mean of `subset` exceeds the mean of `population`.
///
/// # Arguments
/// * `subset` - Sample under test, at least 2 observations
/// * `population` - Reference values; only their mean is used
/// * `alpha` - Significance level
///
/// # Example
/// ```
/// use crime_forecast::validation::one_sample_comparison;
///
/// let lockdown = [14.0, 15.0, 16.0, 15.0, 17.0, 16.0];
/// let baseline = [10.0, 11.0, 9.0, 10.0, 12.0, 8.0];
///
/// let result = one_sample_comparison(&lockdown, &baseline, 0.05).unwrap();
/// assert!(result.significant);
/// ```
pub fn one_sample_comparison(
    subset: &[f64],
    population: &[f64],
    alpha: f64,
) -> Result<OneSampleResult> {
    check_alpha(alpha)?;
    let n = require_sample(subset)?;
    if population.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }

    let se = (variance(subset) / n).sqrt();
    if se == 0.0 {
        return Err(ForecastError::Computation(
            "standard error is zero: subset has no variance".to_string(),
        ));
    }

    let t_statistic = (mean(subset) - mean(population)) / se;
    let p_value = upper_tail(t_statistic, n - 1.0)?;

    Ok(OneSampleResult {
        t_statistic,
        p_value,
        significant: p_value < alpha,
    })
}

/// Welch's unequal-variance t-test of `mean(a) > mean(b)`.
///
/// # Example
/// ```
/// use crime_forecast::validation::two_sample_comparison;
///
/// let a = [20.0, 22.0, 19.0, 21.0, 23.0];
/// let b = [10.0, 12.0, 11.0, 9.0, 13.0, 10.0];
///
/// let result = two_sample_comparison(&a, &b, 0.05).unwrap();
/// assert!(result.reject_null);
/// ```
pub fn two_sample_comparison(a: &[f64], b: &[f64], alpha: f64) -> Result<TwoSampleResult> {
    check_alpha(alpha)?;
    let na = require_sample(a)?;
    let nb = require_sample(b)?;

    let va = variance(a) / na;
    let vb = variance(b) / nb;
    let se = (va + vb).sqrt();
    if se == 0.0 {
        return Err(ForecastError::Computation(
            "standard error is zero: both samples have no variance".to_string(),
        ));
    }

    let t_statistic = (mean(a) - mean(b)) / se;
    let degrees_of_freedom = (va + vb).powi(2) / (va.powi(2) / (na - 1.0) + vb.powi(2) / (nb - 1.0));
    let p_value = upper_tail(t_statistic, degrees_of_freedom)?;
    let reject_null = p_value < alpha;

    let verdict = if reject_null {
        format!("reject the null hypothesis at alpha {alpha}: mean of A is greater than mean of B")
    } else {
        format!("fail to reject the null hypothesis at alpha {alpha}: mean of A is not shown to exceed mean of B")
    };

    Ok(TwoSampleResult {
        t_statistic,
        degrees_of_freedom,
        p_value,
        reject_null,
        verdict,
    })
}

fn require_sample(sample: &[f64]) -> Result<f64> {
    if sample.len() < 2 {
        return Err(ForecastError::InsufficientData {
            needed: 2,
            got: sample.len(),
        });
    }
    Ok(sample.len() as f64)
}

fn check_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}

/// `P(T >= t)` for Student's t with `df` degrees of freedom.
fn upper_tail(t: f64, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| ForecastError::Computation(format!("student t with {df} df: {e}")))?;
    Ok(dist.sf(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_sample_known_statistic() {
        // mean 3, sample sd sqrt(2.5), n = 5 -> se = sqrt(0.5)
        let subset = [1.0, 2.0, 3.0, 4.0, 5.0];
        let population = [2.0, 2.0];
        let result = one_sample_comparison(&subset, &population, 0.05).unwrap();

        assert_relative_eq!(result.t_statistic, 1.0 / 0.5_f64.sqrt(), epsilon = 1e-12);
        assert!(result.p_value > 0.05 && result.p_value < 0.5);
        assert!(!result.significant);
    }

    #[test]
    fn one_sample_lower_mean_is_not_significant() {
        let subset = [5.0, 6.0, 4.0, 5.0];
        let population = [10.0, 11.0, 12.0];
        let result = one_sample_comparison(&subset, &population, 0.05).unwrap();

        assert!(result.t_statistic < 0.0);
        assert!(result.p_value > 0.5);
        assert!(!result.significant);
    }

    #[test]
    fn zero_t_has_half_p_value() {
        let subset = [1.0, 3.0];
        let population = [2.0];
        let result = one_sample_comparison(&subset, &population, 0.05).unwrap();
        assert_relative_eq!(result.t_statistic, 0.0);
        assert_relative_eq!(result.p_value, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn welch_degrees_of_freedom() {
        // Equal variances and sizes: df = 2(n - 1)
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [0.0, 1.0, 2.0, 3.0];
        let result = two_sample_comparison(&a, &b, 0.05).unwrap();

        assert_relative_eq!(result.degrees_of_freedom, 6.0, epsilon = 1e-10);
        // se = sqrt(2 * (5/3) / 4)
        let se = (2.0 * (5.0 / 3.0) / 4.0_f64).sqrt();
        assert_relative_eq!(result.t_statistic, 1.0 / se, epsilon = 1e-12);
    }

    #[test]
    fn welch_rejects_clearly_higher_mean() {
        let a = [30.0, 32.0, 31.0, 29.0, 33.0, 30.0];
        let b = [10.0, 12.0, 11.0, 9.0, 13.0, 10.0];
        let result = two_sample_comparison(&a, &b, 0.05).unwrap();

        assert!(result.reject_null);
        assert!(result.p_value < 1e-6);
        assert!(result.verdict.starts_with("reject"));

        let reversed = two_sample_comparison(&b, &a, 0.05).unwrap();
        assert!(!reversed.reject_null);
        assert!(reversed.verdict.starts_with("fail to reject"));
    }

    #[test]
    fn small_samples_are_rejected() {
        assert!(matches!(
            two_sample_comparison(&[1.0], &[1.0, 2.0], 0.05),
            Err(ForecastError::InsufficientData { needed: 2, got: 1 })
        ));
        assert!(matches!(
            one_sample_comparison(&[1.0, 2.0], &[], 0.05),
            Err(ForecastError::InsufficientData { needed: 1, got: 0 })
        ));
    }

    #[test]
    fn zero_variance_is_computation_error() {
        assert!(matches!(
            one_sample_comparison(&[4.0, 4.0, 4.0], &[1.0], 0.05),
            Err(ForecastError::Computation(_))
        ));
        assert!(matches!(
            two_sample_comparison(&[4.0, 4.0], &[2.0, 2.0], 0.05),
            Err(ForecastError::Computation(_))
        ));
    }

    #[test]
    fn alpha_out_of_range() {
        assert!(matches!(
            one_sample_comparison(&[1.0, 2.0], &[1.0], 1.5),
            Err(ForecastError::InvalidParameter(_))
        ));
    }
}
