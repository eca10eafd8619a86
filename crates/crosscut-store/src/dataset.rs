//! Dataset directory import
//!
//! A dataset directory holds `questions.json`, `responses.json` and an
//! optional `segments.json`.

use crate::catalog::load_catalog;
use crate::digest::compute_dataset_digest;
use crate::errors::{file_not_found, Result};
use crate::responses::load_responses;
use crosscut_core::config::DEFAULT_MULTI_VALUE_DELIMITER;
use crosscut_core::model::{Catalog, ResponseTable};
use std::path::Path;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const RESPONSES_FILE: &str = "responses.json";
pub const SEGMENTS_FILE: &str = "segments.json";

/// Catalog and typed responses loaded from one directory
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: Catalog,
    pub table: ResponseTable,
    /// SHA256 hex digest of the files the dataset was loaded from
    pub digest: String,
}

/// Load a dataset directory with the default multi-value delimiter
///
/// # Errors
///
/// See [`load_dataset_with_delimiter`].
pub fn load_dataset(dir: &Path) -> Result<Dataset> {
    load_dataset_with_delimiter(dir, DEFAULT_MULTI_VALUE_DELIMITER)
}

/// Load a dataset directory
///
/// # Errors
///
/// - `Io`: the directory or a required file is missing
/// - `Serialization`: a file does not parse
/// - `InvalidInput`: duplicate catalog ids
/// - `InvalidCell`: a numeric question holds non-numeric text
pub fn load_dataset_with_delimiter(dir: &Path, delimiter: &str) -> Result<Dataset> {
    if !dir.is_dir() {
        return Err(file_not_found("load_dataset", dir));
    }

    let questions_path = dir.join(QUESTIONS_FILE);
    let responses_path = dir.join(RESPONSES_FILE);
    let segments_path = dir.join(SEGMENTS_FILE);
    let segments_path = segments_path.exists().then_some(segments_path.as_path());

    let catalog = load_catalog(&questions_path, segments_path)?;
    let table = load_responses(&responses_path, &catalog, delimiter)?;
    let digest = compute_dataset_digest(&questions_path, &responses_path, segments_path)?;

    tracing::debug!(
        dir = %dir.display(),
        questions = catalog.questions.len(),
        segments = catalog.segments.len(),
        rows = table.row_count(),
        digest = %digest,
        "loaded dataset"
    );

    Ok(Dataset {
        catalog,
        table,
        digest,
    })
}
