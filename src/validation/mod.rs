//! Statistical comparison of period means.
//!
//! # Example
//!
//! ```
//! use crime_forecast::validation::{two_sample_comparison, DEFAULT_ALPHA};
//!
//! let lockdown = vec![18.0, 21.0, 19.0, 22.0, 20.0, 23.0];
//! let before = vec![12.0, 14.0, 11.0, 13.0, 15.0, 12.0];
//!
//! let result = two_sample_comparison(&lockdown, &before, DEFAULT_ALPHA).unwrap();
//! println!("t = {:.2}, p = {:.4}: {}", result.t_statistic, result.p_value, result.verdict);
//! ```

pub mod hypothesis;

pub use hypothesis::{
    one_sample_comparison, two_sample_comparison, OneSampleResult, TwoSampleResult, DEFAULT_ALPHA,
};
