//! Engine configuration
//!
//! Every field is defaulted, so an empty TOML document is a valid config.
//!
//! ```toml
//! min_base = 30
//! recommended_base = 100
//! multi_value_delimiter = ";"
//! log_profile = "production"
//! ```

use crate::errors::{CutError, Result};
use crate::logging_facility::Profile;
use crate::reliability::ThresholdPolicy;
use serde::Deserialize;

pub const DEFAULT_MIN_BASE: usize = 30;
pub const DEFAULT_RECOMMENDED_BASE: usize = 100;
pub const DEFAULT_MULTI_VALUE_DELIMITER: &str = ";";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub min_base: usize,
    pub recommended_base: usize,
    pub multi_value_delimiter: String,
    pub log_profile: Profile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_base: DEFAULT_MIN_BASE,
            recommended_base: DEFAULT_RECOMMENDED_BASE,
            multi_value_delimiter: DEFAULT_MULTI_VALUE_DELIMITER.to_string(),
            log_profile: Profile::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed TOML or unknown keys, and
    /// `InvalidConfig` when the parsed values are inconsistent.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min_base > recommended_base` or the
    /// multi-value delimiter is empty.
    pub fn validate(&self) -> Result<()> {
        if self.min_base > self.recommended_base {
            return Err(CutError::InvalidConfig {
                reason: format!(
                    "min_base ({}) must not exceed recommended_base ({})",
                    self.min_base, self.recommended_base
                ),
            });
        }
        if self.multi_value_delimiter.is_empty() {
            return Err(CutError::InvalidConfig {
                reason: "multi_value_delimiter must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Threshold policy built from the configured base sizes
    pub fn reliability_policy(&self) -> ThresholdPolicy {
        ThresholdPolicy::new(self.min_base, self.recommended_base)
    }
}
