//! Daily count series and borrowed windows over it.

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// An ordered series of per-day incident counts.
///
/// Dates are unique and strictly increasing. Days without a matching
/// incident are simply absent; no gap filling is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    counts: Vec<u64>,
}

impl DailySeries {
    /// Create a series from parallel date and count vectors.
    pub fn new(dates: Vec<NaiveDate>, counts: Vec<u64>) -> Result<Self> {
        if dates.len() != counts.len() {
            return Err(ForecastError::InvalidWindow(format!(
                "{} dates but {} counts",
                dates.len(),
                counts.len()
            )));
        }

        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::InvalidWindow(format!(
                    "dates must be strictly increasing ({} follows {})",
                    pair[1], pair[0]
                )));
            }
        }

        Ok(Self { dates, counts })
    }

    /// Create a series from `(date, count)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, u64)>,
    {
        let (dates, counts) = pairs.into_iter().unzip();
        Self::new(dates, counts)
    }

    /// Create a series of consecutive days starting at `start`.
    pub fn from_counts(start: NaiveDate, counts: Vec<u64>) -> Self {
        let dates = (0..counts.len())
            .map(|i| start + Duration::days(i as i64))
            .collect();
        Self { dates, counts }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Borrow the whole series as a view.
    pub fn view(&self) -> SeriesView<'_> {
        SeriesView {
            dates: &self.dates,
            counts: &self.counts,
        }
    }

    /// Observations with `start <= date <= end`. Empty if none fall inside.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> SeriesView<'_> {
        self.view().between(start, end)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.view().iter()
    }
}

/// Per-day totals keyed by date are already unique and ordered.
impl From<BTreeMap<NaiveDate, u64>> for DailySeries {
    fn from(totals: BTreeMap<NaiveDate, u64>) -> Self {
        let (dates, counts) = totals.into_iter().unzip();
        Self { dates, counts }
    }
}

/// A borrowed, contiguous slice of a [`DailySeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesView<'a> {
    dates: &'a [NaiveDate],
    counts: &'a [u64],
}

impl<'a> SeriesView<'a> {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &'a [NaiveDate] {
        self.dates
    }

    pub fn counts(&self) -> &'a [u64] {
        self.counts
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Count recorded on `date`, if the date is present.
    pub fn get(&self, date: NaiveDate) -> Option<u64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.counts[idx])
    }

    /// Counts as floating point values, for models and statistical tests.
    pub fn as_f64(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| c as f64).collect()
    }

    /// Arithmetic mean of the counts, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let total: u64 = self.counts.iter().sum();
        Some(total as f64 / self.len() as f64)
    }

    /// Sub-view with `start <= date <= end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> SeriesView<'a> {
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d <= end).max(lo);
        SeriesView {
            dates: &self.dates[lo..hi],
            counts: &self.counts[lo..hi],
        }
    }

    /// The last `n` observations (or all of them when shorter).
    pub fn tail(&self, n: usize) -> SeriesView<'a> {
        let start = self.len().saturating_sub(n);
        SeriesView {
            dates: &self.dates[start..],
            counts: &self.counts[start..],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + 'a {
        self.dates.iter().copied().zip(self.counts.iter().copied())
    }

    /// Copy the view into an owned series.
    pub fn to_series(&self) -> DailySeries {
        DailySeries {
            dates: self.dates.to_vec(),
            counts: self.counts.to_vec(),
        }
    }
}

impl<'a> From<&'a DailySeries> for SeriesView<'a> {
    fn from(series: &'a DailySeries) -> Self {
        series.view()
    }
}
