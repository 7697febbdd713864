//! CSV loader for the launch records dataset.
//!
//! Expected columns (extra columns are ignored):
//! - `Launch Site` (string)
//! - `Payload Mass (kg)` (non-negative number)
//! - `class` (0 = failure, 1 = success)
//! - `Booster Version Category` (string)

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::models::{LaunchRecord, Outcome};
use super::table::LaunchTable;

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN, BOOSTER_COLUMN];

/// Errors raised while loading the dataset. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data source could not be opened.
    #[error("failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV, or a row whose fields do not parse.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is absent.
    #[error("missing required column: {0:?}")]
    MissingColumn(&'static str),

    /// The `class` column holds something other than 0 or 1.
    #[error("row {row}: invalid outcome class {value} (expected 0 or 1)")]
    InvalidOutcome { row: usize, value: i64 },

    /// Payload mass is negative or not a finite number.
    #[error("row {row}: invalid payload mass {value}")]
    InvalidPayload { row: usize, value: f64 },

    /// The table has no rows, so no payload bounds exist.
    #[error("dataset contains no launch records")]
    Empty,
}

/// Raw row as it appears in the CSV
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_kg: f64,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

/// Load the launch table from a CSV file on disk
pub fn load_csv(path: &Path) -> Result<LaunchTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file)
}

/// Load the launch table from any CSV byte stream
pub fn load_from_reader<R: Read>(reader: R) -> Result<LaunchTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<RawRecord>().enumerate() {
        let row = idx + 1;
        let raw = result?;
        records.push(validate(row, raw)?);
    }

    LaunchTable::new(records).ok_or(LoadError::Empty)
}

fn validate(row: usize, raw: RawRecord) -> Result<LaunchRecord, LoadError> {
    if !raw.payload_kg.is_finite() || raw.payload_kg < 0.0 {
        return Err(LoadError::InvalidPayload {
            row,
            value: raw.payload_kg,
        });
    }

    let outcome = u8::try_from(raw.class)
        .ok()
        .and_then(Outcome::from_class)
        .ok_or(LoadError::InvalidOutcome {
            row,
            value: raw.class,
        })?;

    Ok(LaunchRecord::new(
        raw.site,
        raw.payload_kg,
        outcome,
        raw.booster_category,
    ))
}
