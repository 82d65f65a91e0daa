//! Pipeline configuration loaded from JSON.
//!
//! ```json
//! {
//!   "strategy": { "kind": "Colorblind", "type": "DEUTERANOPIA" },
//!   "output": "rgba"
//! }
//! ```
//!
//! `output` is optional and defaults to `"hex"`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::correction::strategy::{CorrectionStrategy, OutputFormat};
use crate::error::CorrectionError;

/// Errors loading a [`CorrectionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] CorrectionError),
}

/// Everything a pipeline needs: which correction, and how to write it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionConfig {
    pub strategy: CorrectionStrategy,
    #[serde(default)]
    pub output: OutputFormat,
}

impl CorrectionConfig {
    pub fn new(strategy: CorrectionStrategy, output: OutputFormat) -> Self {
        Self { strategy, output }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.strategy.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
