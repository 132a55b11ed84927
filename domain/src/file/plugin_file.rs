//! The plugin's own configuration files and their expected versions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Expected `settings.yml` version.
pub const SETTINGS_FILE_VERSION: u32 = 35;
/// Expected `messages.yml` version.
pub const MESSAGES_FILE_VERSION: u32 = 8;
/// Expected `customdrops.yml` version.
pub const CUSTOMDROPS_FILE_VERSION: u32 = 10;
/// Expected `rules.yml` version.
pub const RULES_FILE_VERSION: u32 = 4;

/// Configuration files shipped with the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginFile {
    Settings,
    Messages,
    CustomDrops,
    Rules,
}

impl PluginFile {
    /// All files, in the order the plugin loads them.
    pub const ALL: [PluginFile; 4] = [
        PluginFile::Settings,
        PluginFile::Messages,
        PluginFile::CustomDrops,
        PluginFile::Rules,
    ];

    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Messages => "messages",
            Self::CustomDrops => "customdrops",
            Self::Rules => "rules",
        }
    }

    /// The version this build expects for the file.
    pub fn compatible_version(&self) -> u32 {
        match self {
            Self::Settings => SETTINGS_FILE_VERSION,
            Self::Messages => MESSAGES_FILE_VERSION,
            Self::CustomDrops => CUSTOMDROPS_FILE_VERSION,
            Self::Rules => RULES_FILE_VERSION,
        }
    }
}

impl fmt::Display for PluginFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}

impl FromStr for PluginFile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_suffix(".yml").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|file| file.base_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("Unknown plugin file: {s}"))
    }
}
