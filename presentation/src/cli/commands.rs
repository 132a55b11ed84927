//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// JSON document
    Json,
}

impl From<OutputFormat> for lmconfig_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for lmconfig
#[derive(Parser, Debug)]
#[command(name = "lmconfig")]
#[command(author, version, about = "Load, validate and migrate LevelledMobs config files")]
#[command(long_about = r#"
lmconfig loads the versioned YAML files of a LevelledMobs data directory.

A file older than the version this build expects is backed up as
<name>.yml.v<version>.old, regenerated from the packaged default, and the
old values are carried over. rules.yml from version 2 on is updated in place.

Configuration files are loaded from (in priority order):
1. LMCONFIG_* environment variables
2. --config <path>     Explicit config file
3. ./lmconfig.toml     Project-level config
4. ~/.config/lmconfig/config.toml   Global config

Example:
  lmconfig status
  lmconfig reload --data-dir /srv/minecraft/plugins/LevelledMobs
  lmconfig load rules --compatible 4 --output json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the plugin's .yml files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory of packaged default files (embedded defaults otherwise)
    #[arg(long, global = true, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load one file, migrating it if outdated
    Load {
        /// Logical file name, e.g. `settings` or `rules`
        name: String,

        /// Expected file version (defaults to the plugin's own for known files)
        #[arg(long, value_name = "N")]
        compatible: Option<u32>,
    },

    /// Load every plugin file in plugin order
    Reload {
        /// Skip customdrops.yml
        #[arg(long)]
        skip_custom_drops: bool,
    },

    /// Show each file's version and what a load would do, without writing
    Status,

    /// List the file versions this build expects
    Versions,
}
