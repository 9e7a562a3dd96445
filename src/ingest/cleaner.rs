//! Normalizing raw incident rows.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::ingest::{IngestError, RawIncident};

const UNKNOWN: &str = "unknown";

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// A cleaned incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub incident_number: Option<String>,
    pub offense_code: Option<String>,
    /// Lowercased; `"unknown"` when missing.
    pub offense_code_group: String,
    /// Lowercased; `"unknown"` when missing.
    pub offense_description: String,
    pub district: Option<String>,
    /// 0 when missing or not a number.
    pub reporting_area: u32,
    /// 1 if a shooting was involved, else 0.
    pub shooting: u8,
    pub occurred_on: NaiveDateTime,
    /// `"unknown"` when missing.
    pub ucr_part: String,
    pub street: Option<String>,
}

impl Incident {
    /// Calendar day of the incident.
    pub fn date(&self) -> NaiveDate {
        self.occurred_on.date()
    }
}

/// Clean raw rows, failing on the first unparsable timestamp.
///
/// Row numbers in errors are 1-based positions in `raw`.
pub fn clean_incidents(raw: Vec<RawIncident>) -> Result<Vec<Incident>, IngestError> {
    let total = raw.len();
    let incidents = raw
        .into_iter()
        .enumerate()
        .map(|(idx, row)| clean_row(idx + 1, row))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = total, "cleaned incidents");
    Ok(incidents)
}

fn clean_row(row: usize, raw: RawIncident) -> Result<Incident, IngestError> {
    let stamp = present(raw.occurred_on_date).unwrap_or_default();
    let occurred_on = parse_timestamp(&stamp).ok_or_else(|| IngestError::Timestamp {
        row,
        value: stamp.clone(),
    })?;

    Ok(Incident {
        incident_number: present(raw.incident_number),
        offense_code: present(raw.offense_code),
        offense_code_group: lowercase_or_unknown(raw.offense_code_group),
        offense_description: lowercase_or_unknown(raw.offense_description),
        district: present(raw.district),
        reporting_area: present(raw.reporting_area)
            .and_then(|area| area.parse().ok())
            .unwrap_or(0),
        shooting: shooting_flag(raw.shooting.as_deref()),
        occurred_on,
        ucr_part: present(raw.ucr_part).unwrap_or_else(|| UNKNOWN.to_string()),
        street: present(raw.street),
    })
}

/// `None` for missing or whitespace-only values.
fn present(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn lowercase_or_unknown(value: Option<String>) -> String {
    present(value)
        .map(|v| v.to_lowercase())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn shooting_flag(value: Option<&str>) -> u8 {
    match value.map(str::trim) {
        Some("Y") | Some("y") | Some("1") => 1,
        _ => 0,
    }
}

/// Parse an `occurred_on_date` value.
///
/// Accepts `%Y-%m-%d %H:%M:%S` (with an optional `+00` offset suffix),
/// `%Y-%m-%dT%H:%M:%S`, `%m/%d/%Y %H:%M` and a bare `%Y-%m-%d`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let value = value
        .strip_suffix("+00:00")
        .or_else(|| value.strip_suffix("+00"))
        .unwrap_or(value)
        .trim_end();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
