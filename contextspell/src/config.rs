//! Engine and session configuration.
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the correction engine and the auto-correct session.
///
/// Every field has a default, so a configuration file only needs to list
/// the values it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// maximum number of words held in the suggestion cache
    pub cache_capacity: usize,
    /// maximum number of ranked candidates returned for a word
    pub max_suggestions: usize,
    /// number of tokens on each side of a word used as context
    pub context_radius: usize,
    /// largest edit distance the fallback corrector accepts
    pub fallback_threshold: usize,
    /// ask the fallback corrector when ranking yields nothing
    pub use_fallback: bool,
    /// re-apply the original capitalisation to replacements
    pub preserve_case: bool,
    /// idle time after the last edit before correction runs
    pub typing_delay_ms: u64,
    /// whether text changes trigger correction at all
    pub enabled: bool,
}

impl CorrectorConfig {
    /// Default values, usable in `const` context.
    pub const fn default() -> CorrectorConfig {
        CorrectorConfig {
            cache_capacity: 1000,
            max_suggestions: 5,
            context_radius: 2,
            fallback_threshold: 2,
            use_fallback: true,
            preserve_case: false,
            typing_delay_ms: 500,
            enabled: true,
        }
    }

    /// Parses a JSON configuration. Missing fields take their defaults.
    pub fn from_reader<R: Read>(reader: R) -> Result<CorrectorConfig, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CorrectorConfig, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        let config = Self::from_reader(std::io::BufReader::new(file))?;
        log::debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig::default()
    }
}
