//! Partition a daily series into train/validate/test windows.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::policy::{SplitPolicy, TestPlacement, WindowLabel};
use crate::core::{DailySeries, SeriesView};
use crate::error::{ForecastError, Result};

/// A labelled, inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub label: WindowLabel,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    /// Number of calendar days covered, including both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The three windows produced by [`split`], borrowing the source series.
#[derive(Debug, Clone, Copy)]
pub struct Splits<'a> {
    train: SeriesView<'a>,
    validate: SeriesView<'a>,
    test: SeriesView<'a>,
    gap: Option<SeriesView<'a>>,
    windows: [TimeWindow; 3],
}

impl<'a> Splits<'a> {
    pub fn train(&self) -> SeriesView<'a> {
        self.train
    }

    pub fn validate(&self) -> SeriesView<'a> {
        self.validate
    }

    pub fn test(&self) -> SeriesView<'a> {
        self.test
    }

    pub fn get(&self, label: WindowLabel) -> SeriesView<'a> {
        match label {
            WindowLabel::Train => self.train,
            WindowLabel::Validate => self.validate,
            WindowLabel::Test => self.test,
        }
    }

    /// Calendar boundaries of train, validate and test, in that order.
    pub fn windows(&self) -> [TimeWindow; 3] {
        self.windows
    }

    pub fn window(&self, label: WindowLabel) -> TimeWindow {
        match label {
            WindowLabel::Train => self.windows[0],
            WindowLabel::Validate => self.windows[1],
            WindowLabel::Test => self.windows[2],
        }
    }

    /// Observations skipped between validate and test under a gap policy.
    pub fn gap(&self) -> Option<SeriesView<'a>> {
        self.gap
    }
}

/// Split `series` according to `policy`.
///
/// Fails with [`ForecastError::InvalidWindow`] when a boundary lies outside
/// the series, when the windows would overlap, or when a window holds no
/// observations.
pub fn split<'a>(series: &'a DailySeries, policy: &SplitPolicy) -> Result<Splits<'a>> {
    let (first, last) = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(ForecastError::InvalidWindow(
                "cannot split an empty series".to_string(),
            ))
        }
    };

    let in_range = |name: &str, date: NaiveDate| -> Result<()> {
        if date < first || date > last {
            return Err(ForecastError::InvalidWindow(format!(
                "{name} {date} is outside the series range {first}..={last}"
            )));
        }
        Ok(())
    };

    if let Some(train_start) = policy.train_start {
        in_range("train_start", train_start)?;
    }
    in_range("train_end", policy.train_end)?;
    in_range("validate_end", policy.validate_end)?;
    if let TestPlacement::Gap { test_start } = policy.test {
        in_range("test_start", test_start)?;
    }
    if let Some(test_end) = policy.test_end {
        in_range("test_end", test_end)?;
    }

    let train_start = policy.train_start.unwrap_or(first);
    let validate_start = policy.train_end + Duration::days(1);
    let test_start = match policy.test {
        TestPlacement::Contiguous => policy.validate_end + Duration::days(1),
        TestPlacement::Gap { test_start } => test_start,
    };
    let test_end = policy.test_end.unwrap_or(last);

    if train_start > policy.train_end {
        return Err(ForecastError::InvalidWindow(format!(
            "train_start {train_start} is after train_end {}",
            policy.train_end
        )));
    }
    if validate_start > policy.validate_end {
        return Err(ForecastError::InvalidWindow(format!(
            "validate_end {} must be after train_end {}",
            policy.validate_end, policy.train_end
        )));
    }
    if test_start <= policy.validate_end {
        return Err(ForecastError::InvalidWindow(format!(
            "test_start {test_start} overlaps the validate window ending {}",
            policy.validate_end
        )));
    }
    if test_start > test_end {
        return Err(ForecastError::InvalidWindow(format!(
            "test window {test_start}..={test_end} is empty"
        )));
    }

    let windows = [
        TimeWindow {
            label: WindowLabel::Train,
            start: train_start,
            end: policy.train_end,
        },
        TimeWindow {
            label: WindowLabel::Validate,
            start: validate_start,
            end: policy.validate_end,
        },
        TimeWindow {
            label: WindowLabel::Test,
            start: test_start,
            end: test_end,
        },
    ];

    let [train, validate, test] = windows.map(|w| series.between(w.start, w.end));

    for (window, view) in windows.iter().zip([train, validate, test]) {
        if view.is_empty() {
            return Err(ForecastError::InvalidWindow(format!(
                "{} window {}..={} contains no observations",
                window.label, window.start, window.end
            )));
        }
    }

    let gap = match policy.test {
        TestPlacement::Contiguous => None,
        TestPlacement::Gap { test_start } => Some(series.between(
            policy.validate_end + Duration::days(1),
            test_start - Duration::days(1),
        )),
    };

    debug!(
        policy = policy.placement_name(),
        train = train.len(),
        validate = validate.len(),
        test = test.len(),
        gap = gap.map(|g| g.len()).unwrap_or(0),
        "split daily series"
    );

    Ok(Splits {
        train,
        validate,
        test,
        gap,
        windows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 2017-01-01 through 2022-12-31, count = day index modulo 7.
    fn six_years() -> DailySeries {
        let start = day(2017, 1, 1);
        let n = (day(2022, 12, 31) - start).num_days() as usize + 1;
        DailySeries::from_counts(start, (0..n as u64).map(|i| i % 7).collect())
    }

    #[test]
    fn contiguous_preset_windows() {
        let series = six_years();
        let splits = split(&series, &SplitPolicy::pre_lockdown_backtest()).unwrap();

        assert_eq!(splits.train().first_date(), Some(day(2017, 3, 14)));
        assert_eq!(splits.train().last_date(), Some(day(2019, 3, 15)));
        assert_eq!(splits.validate().first_date(), Some(day(2019, 3, 16)));
        assert_eq!(splits.validate().last_date(), Some(day(2020, 3, 16)));
        assert_eq!(splits.test().first_date(), Some(day(2020, 3, 17)));
        assert_eq!(splits.test().last_date(), Some(day(2021, 3, 15)));
        assert!(splits.gap().is_none());
    }

    #[test]
    fn gap_preset_skips_lockdown_year() {
        let series = six_years();
        let splits = split(&series, &SplitPolicy::post_recovery()).unwrap();

        assert_eq!(splits.test().first_date(), Some(day(2021, 3, 16)));
        assert_eq!(splits.test().last_date(), Some(day(2022, 12, 31)));

        let gap = splits.gap().unwrap();
        assert_eq!(gap.first_date(), Some(day(2020, 3, 17)));
        assert_eq!(gap.last_date(), Some(day(2021, 3, 15)));
    }

    #[test]
    fn default_bounds_cover_the_whole_series() {
        let series = DailySeries::from_counts(day(2020, 1, 1), vec![1; 30]);
        let policy = SplitPolicy::contiguous(day(2020, 1, 10), day(2020, 1, 20));
        let splits = split(&series, &policy).unwrap();

        let total = splits.train().len() + splits.validate().len() + splits.test().len();
        assert_eq!(total, series.len());
        assert_eq!(splits.window(WindowLabel::Train).days(), 10);
        assert_eq!(splits.window(WindowLabel::Test).days(), 10);
    }

    #[test]
    fn boundary_outside_series_is_rejected() {
        let series = DailySeries::from_counts(day(2020, 1, 1), vec![1; 30]);
        let policy = SplitPolicy::contiguous(day(2020, 1, 10), day(2020, 3, 1));
        assert!(matches!(
            split(&series, &policy),
            Err(ForecastError::InvalidWindow(_))
        ));

        let policy = SplitPolicy::contiguous(day(2020, 1, 10), day(2020, 1, 20))
            .with_train_start(day(2019, 12, 1));
        assert!(split(&series, &policy).is_err());
    }

    #[test]
    fn overlapping_windows_are_rejected() {
        let series = DailySeries::from_counts(day(2020, 1, 1), vec![1; 30]);

        let policy = SplitPolicy::contiguous(day(2020, 1, 20), day(2020, 1, 10));
        assert!(matches!(
            split(&series, &policy),
            Err(ForecastError::InvalidWindow(_))
        ));

        let policy = SplitPolicy::gap(day(2020, 1, 10), day(2020, 1, 20), day(2020, 1, 15));
        assert!(matches!(
            split(&series, &policy),
            Err(ForecastError::InvalidWindow(_))
        ));
    }

    #[test]
    fn empty_window_is_rejected() {
        // Sparse series with nothing recorded between Jan 11 and Jan 20.
        let mut pairs: Vec<(NaiveDate, u64)> = (1..=10).map(|d| (day(2020, 1, d), 1)).collect();
        pairs.extend((21..=30).map(|d| (day(2020, 1, d), 1)));
        let series = DailySeries::from_pairs(pairs).unwrap();

        let policy = SplitPolicy::contiguous(day(2020, 1, 10), day(2020, 1, 20));
        let err = split(&series, &policy).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidWindow(msg) if msg.contains("validate")));
    }

    #[test]
    fn contiguous_test_past_series_end_is_rejected() {
        let series = DailySeries::from_counts(day(2020, 1, 1), vec![1; 30]);
        let policy = SplitPolicy::contiguous(day(2020, 1, 10), day(2020, 1, 30));
        assert!(matches!(
            split(&series, &policy),
            Err(ForecastError::InvalidWindow(_))
        ));
    }

    #[test]
    fn empty_series_is_rejected() {
        let policy = SplitPolicy::contiguous(day(2020, 1, 10), day(2020, 1, 20));
        assert!(split(&DailySeries::default(), &policy).is_err());
    }

    #[test]
    fn splitting_is_idempotent() {
        let series = six_years();
        let policy = SplitPolicy::post_recovery();
        let a = split(&series, &policy).unwrap();
        let b = split(&series, &policy).unwrap();

        for label in WindowLabel::ALL {
            assert_eq!(a.get(label), b.get(label));
        }
        assert_eq!(a.windows(), b.windows());
    }
}
