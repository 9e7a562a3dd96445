//! `date,count` CSV persistence for daily series.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::DailySeries;
use crate::ingest::IngestError;

#[derive(Debug, Serialize, Deserialize)]
struct DailyCountRow {
    date: NaiveDate,
    count: u64,
}

/// Write `series` as a `date,count` CSV.
pub fn write_daily_counts(series: &DailySeries, path: impl AsRef<Path>) -> Result<(), IngestError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for (date, count) in series.iter() {
        writer.serialize(DailyCountRow { date, count })?;
    }
    writer.flush()?;

    info!(path = %path.display(), days = series.len(), "wrote daily counts");
    Ok(())
}

/// Read a series written by [`write_daily_counts`].
///
/// Rows must be in strictly increasing date order.
pub fn read_daily_counts(path: impl AsRef<Path>) -> Result<DailySeries, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut pairs = Vec::new();
    for row in reader.deserialize() {
        let row: DailyCountRow = row?;
        pairs.push((row.date, row.count));
    }

    Ok(DailySeries::from_pairs(pairs)?)
}
