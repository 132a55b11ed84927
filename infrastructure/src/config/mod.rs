//! Configuration file loading for lmconfig
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LMCONFIG_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./lmconfig.toml` or `./.lmconfig.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/lmconfig/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigOverrides, ConfigValidationError, DEFAULT_DATA_DIR, OutputSettings, ToolConfig,
};
pub use loader::ConfigLoader;
