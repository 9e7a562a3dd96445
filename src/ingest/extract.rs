//! Category filtering and per-day aggregation.

use std::collections::BTreeMap;

use tracing::info;

use crate::core::DailySeries;
use crate::ingest::Incident;

/// Predicate selecting one crime category.
///
/// Keywords are matched case-insensitively against the already lowercased
/// incident fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Offense description contains the keyword.
    DescriptionContains(String),
    /// Offense code group equals the keyword.
    CodeGroup(String),
}

impl CategoryFilter {
    pub fn description_contains(keyword: impl AsRef<str>) -> Self {
        Self::DescriptionContains(keyword.as_ref().trim().to_lowercase())
    }

    pub fn code_group(group: impl AsRef<str>) -> Self {
        Self::CodeGroup(group.as_ref().trim().to_lowercase())
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        match self {
            Self::DescriptionContains(keyword) => incident.offense_description.contains(keyword),
            Self::CodeGroup(group) => incident.offense_code_group == *group,
        }
    }
}

/// Count matching incidents per calendar day.
///
/// Only days with at least one match appear in the result.
pub fn extract_daily_counts<F>(records: &[Incident], predicate: F) -> DailySeries
where
    F: Fn(&Incident) -> bool,
{
    let mut totals: BTreeMap<_, u64> = BTreeMap::new();
    for incident in records.iter().filter(|i| predicate(i)) {
        *totals.entry(incident.date()).or_default() += 1;
    }

    let series = DailySeries::from(totals);
    info!(
        incidents = records.len(),
        days = series.len(),
        first = ?series.first_date(),
        last = ?series.last_date(),
        "extracted daily counts"
    );
    series
}
