//! Calendar split policies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ForecastError;

/// Role of a window in the backtest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowLabel {
    Train,
    Validate,
    Test,
}

impl WindowLabel {
    pub const ALL: [WindowLabel; 3] = [WindowLabel::Train, WindowLabel::Validate, WindowLabel::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowLabel::Train => "train",
            WindowLabel::Validate => "validate",
            WindowLabel::Test => "test",
        }
    }
}

impl fmt::Display for WindowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowLabel {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "train" => Ok(WindowLabel::Train),
            "validate" | "validation" => Ok(WindowLabel::Validate),
            "test" => Ok(WindowLabel::Test),
            other => Err(ForecastError::InvalidParameter(format!(
                "unknown window label '{other}'"
            ))),
        }
    }
}

/// Where the test window starts relative to the validate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestPlacement {
    /// Test begins the day after validate ends.
    Contiguous,
    /// Test begins at `test_start`; the days between validate and test are skipped.
    Gap { test_start: NaiveDate },
}

/// Calendar boundaries for a train/validate/test split.
///
/// All boundaries are inclusive. Train and validate are always contiguous:
/// validate starts the day after `train_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPolicy {
    /// First training day; `None` uses the first date of the series.
    #[serde(default)]
    pub train_start: Option<NaiveDate>,
    pub train_end: NaiveDate,
    pub validate_end: NaiveDate,
    pub test: TestPlacement,
    /// Last test day; `None` uses the last date of the series.
    #[serde(default)]
    pub test_end: Option<NaiveDate>,
}

impl SplitPolicy {
    /// Standard backtest: test immediately follows validate.
    pub fn contiguous(train_end: NaiveDate, validate_end: NaiveDate) -> Self {
        Self {
            train_start: None,
            train_end,
            validate_end,
            test: TestPlacement::Contiguous,
            test_end: None,
        }
    }

    /// Test resumes at `test_start`, skipping a disrupted interim period.
    pub fn gap(train_end: NaiveDate, validate_end: NaiveDate, test_start: NaiveDate) -> Self {
        Self {
            train_start: None,
            train_end,
            validate_end,
            test: TestPlacement::Gap { test_start },
            test_end: None,
        }
    }

    pub fn with_train_start(mut self, train_start: NaiveDate) -> Self {
        self.train_start = Some(train_start);
        self
    }

    pub fn with_test_end(mut self, test_end: NaiveDate) -> Self {
        self.test_end = Some(test_end);
        self
    }

    /// Two years of training, the pre-pandemic year as validate, and the
    /// lockdown year as test.
    pub fn pre_lockdown_backtest() -> Self {
        Self::contiguous(ymd(2019, 3, 15), ymd(2020, 3, 16))
            .with_train_start(ymd(2017, 3, 14))
            .with_test_end(ymd(2021, 3, 15))
    }

    /// Same train/validate as [`SplitPolicy::pre_lockdown_backtest`], but the
    /// test window starts once restrictions were lifted (March 2021).
    pub fn post_recovery() -> Self {
        Self::gap(ymd(2019, 3, 15), ymd(2020, 3, 16), ymd(2021, 3, 16))
            .with_train_start(ymd(2017, 3, 14))
    }

    /// Name of the test placement, as used in reports and the CLI.
    pub fn placement_name(&self) -> &'static str {
        match self.test {
            TestPlacement::Contiguous => "contiguous",
            TestPlacement::Gap { .. } => "gap",
        }
    }
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self::post_recovery()
    }
}

/// Start of the Boston stay-at-home order.
pub fn lockdown_start() -> NaiveDate {
    ymd(2020, 3, 15)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("preset boundaries are valid dates")
}
