//! Dataset digest
//!
//! Computes a stable SHA256 digest over the raw bytes of the dataset files
//! so runs can be traced back to the exact inputs they used.

use crate::errors::{io_error, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Compute a digest over the questions, responses and optional segments files
///
/// Files are hashed in that order with no separators.
///
/// # Errors
///
/// `Io` if any given file cannot be read.
pub fn compute_dataset_digest(
    questions_path: &Path,
    responses_path: &Path,
    segments_path: Option<&Path>,
) -> Result<String> {
    let mut hasher = Sha256::new();

    for path in [Some(questions_path), Some(responses_path), segments_path]
        .into_iter()
        .flatten()
    {
        let bytes = fs::read(path).map_err(|e| io_error("compute_dataset_digest", path, e))?;
        hasher.update(&bytes);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// SHA256 hex digest of a string
pub fn hash_str(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
