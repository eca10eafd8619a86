//! Response record loading
//!
//! Records are a JSON array of objects, one per respondent. Keys are
//! column names; values are strings, numbers or null.

use crate::errors::{file_not_found, from_core, invalid_input, io_error, parse_error, Result};
use crosscut_core::model::{Catalog, Record, ResponseTable};
use std::fs;
use std::path::Path;

/// Load response records from `path` and type them against `catalog`
///
/// # Errors
///
/// - `Io`: the file is missing or unreadable
/// - `Serialization`: the file is not an array of flat records
/// - `InvalidCell`: a numeric question holds text that is not a number
pub fn load_responses(path: &Path, catalog: &Catalog, delimiter: &str) -> Result<ResponseTable> {
    if !path.exists() {
        return Err(file_not_found("load_responses", path));
    }
    let content = fs::read_to_string(path).map_err(|e| io_error("load_responses", path, e))?;
    let records: Vec<Record> =
        serde_json::from_str(&content).map_err(|e| parse_error("load_responses", path, e))?;

    tracing::debug!(path = %path.display(), rows = records.len(), "read response records");
    build_table(catalog, &records, delimiter)
}

/// Type response records held in memory
///
/// # Errors
///
/// `InvalidInput` for malformed JSON, otherwise as [`load_responses`].
pub fn parse_responses_str(
    content: &str,
    catalog: &Catalog,
    delimiter: &str,
) -> Result<ResponseTable> {
    let records: Vec<Record> = serde_json::from_str(content)
        .map_err(|e| invalid_input("parse_responses", &format!("JSON parse error: {}", e)))?;
    build_table(catalog, &records, delimiter)
}

fn build_table(catalog: &Catalog, records: &[Record], delimiter: &str) -> Result<ResponseTable> {
    ResponseTable::from_records(catalog, records, delimiter)
        .map_err(|e| from_core("load_responses", e))
}
