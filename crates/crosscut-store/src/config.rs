//! Engine configuration loading

use crate::errors::{file_not_found, from_core, io_error, Result};
use crosscut_core::EngineConfig;
use std::fs;
use std::path::Path;

/// Read and validate an engine config TOML file
///
/// # Errors
///
/// - `Io`: the file is missing or unreadable
/// - `Serialization`: malformed TOML or unknown keys
/// - `InvalidConfig`: inconsistent thresholds or an empty delimiter
pub fn load_engine_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Err(file_not_found("load_engine_config", path));
    }
    let content = fs::read_to_string(path).map_err(|e| io_error("load_engine_config", path, e))?;
    let config =
        EngineConfig::from_toml_str(&content).map_err(|e| from_core("load_engine_config", e))?;

    tracing::debug!(
        path = %path.display(),
        min_base = config.min_base,
        recommended_base = config.recommended_base,
        "loaded engine config"
    );
    Ok(config)
}
