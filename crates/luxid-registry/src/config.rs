//! Registry configuration.
//!
//! Loaded from a TOML file or populated with defaults. Every field is
//! optional in the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use luxid_core::{CommitmentAlgorithm, DEFAULT_MAX_ID_LEN, MAX_ID_LEN_LIMIT};

use crate::error::{RegistryError, Result};

/// Configuration for the Registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Maximum product identifier length in bytes.
    #[serde(default = "default_max_id_len")]
    pub max_id_len: usize,

    /// Hash used to derive commitments. Registrant and verifier must agree.
    #[serde(default)]
    pub algorithm: CommitmentAlgorithm,

    /// Append-only audit log of registration events. When unset, events go
    /// to `tracing` only.
    #[serde(default)]
    pub event_log: Option<PathBuf>,
}

fn default_max_id_len() -> usize {
    DEFAULT_MAX_ID_LEN
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_id_len: default_max_id_len(),
            algorithm: CommitmentAlgorithm::default(),
            event_log: None,
        }
    }
}

impl RegistryConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: RegistryConfig =
            toml::from_str(contents).map_err(|e| RegistryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file at the given path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check field ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_id_len == 0 || self.max_id_len > MAX_ID_LEN_LIMIT {
            return Err(RegistryError::Config(format!(
                "max_id_len must be between 1 and {}, got {}",
                MAX_ID_LEN_LIMIT, self.max_id_len
            )));
        }
        Ok(())
    }
}
