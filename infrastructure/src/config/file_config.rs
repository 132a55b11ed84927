//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use lmconfig_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Data directory of a standard plugin install, relative to the server root.
pub const DEFAULT_DATA_DIR: &str = "plugins/LevelledMobs";

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("data_dir cannot be empty")]
    EmptyDataDir,

    #[error("resources_dir cannot be empty when set")]
    EmptyResourcesDir,
}

/// Complete tool configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Directory holding the live plugin files
    pub data_dir: PathBuf,
    /// Directory of packaged defaults; the embedded copies are used when unset
    pub resources_dir: Option<PathBuf>,
    /// Whether `reload` includes customdrops.yml
    pub load_custom_drops: bool,
    /// `[output]` section
    pub output: OutputSettings,
}

/// How command results are printed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when `--output` is not given
    pub format: Option<OutputFormat>,
    /// Colored loader messages and reports; markup codes are stripped when off
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Command line flags that take precedence over every config source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub resources_dir: Option<PathBuf>,
    pub no_color: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            resources_dir: None,
            load_custom_drops: true,
            output: OutputSettings::default(),
        }
    }
}

impl ToolConfig {
    /// Applies command line overrides, then validates the result.
    pub fn with_overrides(
        mut self,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigValidationError> {
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = overrides.resources_dir {
            self.resources_dir = Some(dir);
        }
        if overrides.no_color {
            self.output.color = false;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyDataDir);
        }
        if let Some(dir) = &self.resources_dir
            && dir.as_os_str().is_empty()
        {
            return Err(ConfigValidationError::EmptyResourcesDir);
        }
        Ok(())
    }
}
