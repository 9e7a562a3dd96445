//! Reading raw incident CSVs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;
use tracing::info;

use crate::ingest::IngestError;

/// One incident row as it appears in the source files.
///
/// Header case differs between yearly files, so headers are lowercased
/// before deserializing. Missing columns and empty cells become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawIncident {
    pub incident_number: Option<String>,
    pub offense_code: Option<String>,
    pub offense_code_group: Option<String>,
    pub offense_description: Option<String>,
    pub district: Option<String>,
    pub reporting_area: Option<String>,
    pub shooting: Option<String>,
    pub occurred_on_date: Option<String>,
    pub ucr_part: Option<String>,
    pub street: Option<String>,
}

/// Load every row of one incident CSV.
pub fn load_incident_file(path: impl AsRef<Path>) -> Result<Vec<RawIncident>, IngestError> {
    let path = path.as_ref();
    let rows = read_incidents(File::open(path)?)?;
    info!(path = %path.display(), rows = rows.len(), "loaded incident file");
    Ok(rows)
}

/// Load and concatenate several incident CSVs, in the order given.
pub fn load_incident_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawIncident>, IngestError> {
    let mut combined = Vec::new();
    for path in paths {
        combined.extend(load_incident_file(path)?);
    }
    Ok(combined)
}

fn read_incidents<R: Read>(source: R) -> Result<Vec<RawIncident>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    reader.set_headers(headers);

    let mut rows: Vec<RawIncident> = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
