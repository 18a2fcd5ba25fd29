//! Reader configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options controlling how game records are read.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PgnConfig {
    /// Accept `'` as well as `"` around tag values. Defaults to true.
    #[serde(default = "default_true")]
    pub allow_single_quotes: bool,
    /// Skip parenthesised variations in movetext. When false a `(` is a
    /// parse error. Defaults to true.
    #[serde(default = "default_true")]
    pub skip_variations: bool,
    /// Stop after this many games.
    #[serde(default)]
    pub max_games: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for PgnConfig {
    fn default() -> Self {
        PgnConfig {
            allow_single_quotes: true,
            skip_variations: true,
            max_games: None,
        }
    }
}

impl PgnConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
