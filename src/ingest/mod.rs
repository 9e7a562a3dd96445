//! Incident CSV ingestion: load, clean, filter by category, count per day.
//!
//! # Example
//!
//! ```no_run
//! use crime_forecast::ingest::{clean_incidents, extract_daily_counts, load_incident_files, CategoryFilter};
//!
//! let raw = load_incident_files(&["crime_2019.csv", "crime_2020.csv"])?;
//! let incidents = clean_incidents(raw)?;
//! let fraud = CategoryFilter::description_contains("fraud");
//! let series = extract_daily_counts(&incidents, |i| fraud.matches(i));
//! # Ok::<(), crime_forecast::ingest::IngestError>(())
//! ```

mod cleaner;
mod extract;
mod loader;
mod store;

pub use cleaner::{clean_incidents, parse_timestamp, Incident};
pub use extract::{extract_daily_counts, CategoryFilter};
pub use loader::{load_incident_file, load_incident_files, RawIncident};
pub use store::{read_daily_counts, write_daily_counts};

use thiserror::Error;

use crate::error::ForecastError;

/// Errors raised while reading incident files or stored daily counts.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An `occurred_on_date` value matched none of the accepted formats.
    #[error("row {row}: unparsable timestamp '{value}'")]
    Timestamp { row: usize, value: String },

    #[error(transparent)]
    Series(#[from] ForecastError),
}
