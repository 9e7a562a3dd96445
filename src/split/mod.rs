//! Deterministic train/validate/test windowing around the lockdown.
//!
//! A [`SplitPolicy`] names the calendar boundaries; [`split`] turns a
//! [`DailySeries`](crate::core::DailySeries) into three borrowed windows.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use crime_forecast::core::DailySeries;
//! use crime_forecast::split::{split, SplitPolicy};
//!
//! let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let series = DailySeries::from_counts(start, vec![3; 60]);
//! let policy = SplitPolicy::contiguous(
//!     NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
//!     NaiveDate::from_ymd_opt(2020, 2, 15).unwrap(),
//! );
//!
//! let splits = split(&series, &policy).unwrap();
//! assert_eq!(splits.train().len(), 31);
//! assert_eq!(splits.validate().len(), 15);
//! assert_eq!(splits.test().len(), 14);
//! ```

mod policy;
mod splitter;

pub use policy::{lockdown_start, SplitPolicy, TestPlacement, WindowLabel};
pub use splitter::{split, Splits, TimeWindow};
