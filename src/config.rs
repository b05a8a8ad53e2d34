//! Merge defaults loaded from `sln-merge.toml`.
//!
//! The file is optional. When present it supplies the input list, the
//! output path, and the type-GUID behavior, so `sln-merge merge` can run
//! with no arguments from a checkout root. Command-line flags override
//! whatever the file says.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error types for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Merge defaults.
///
/// ```toml
/// inputs = ["Game/Game.sln", "Kari/Kari.sln"]
/// output = "Master.sln"
/// keep_project_types = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Solution files to combine, in merge order.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    /// Where the master solution is written.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Keep each project's own type GUID instead of stamping the fixed one.
    #[serde(default)]
    pub keep_project_types: bool,
}

impl MergeConfig {
    /// Load and parse config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse config from a TOML string.
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: MergeConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.inputs.is_empty() {
            return Err(ConfigError::Validation(
                "no input solutions listed under 'inputs'".to_string(),
            ));
        }
        Ok(())
    }
}
