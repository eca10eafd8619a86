//! Error handling for crosscut-store
//!
//! Wraps crosscut-core CxError with store-specific helpers

use crosscut_core::errors::{CutError, CxError, CxErrorKind};
use std::path::Path;

/// Result type alias using CxError
pub type Result<T> = std::result::Result<T, CxError>;

/// Create an IO error for `path`
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> CxError {
    CxError::new(CxErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a missing file error
pub fn file_not_found(operation: &str, path: &Path) -> CxError {
    CxError::new(CxErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(format!("File not found: {}", path.display()))
}

/// Create an input shape error
pub fn invalid_input(operation: &str, reason: &str) -> CxError {
    CxError::new(CxErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_message(reason.to_string())
}

/// Create a parse error for `path`
pub fn parse_error(operation: &str, path: &Path, err: impl std::fmt::Display) -> CxError {
    CxError::new(CxErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(format!("Failed to parse {}: {}", path.display(), err))
}

/// Attach the store operation to a core error
pub fn from_core(operation: &str, err: CutError) -> CxError {
    CxError::from(err).with_op(operation.to_string())
}
