//! File kind value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a configuration file, derived from its logical name.
///
/// The kind picks the migration strategy: generic key copy for most files,
/// dedicated routines for custom drops and rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Generic,
    CustomDrops,
    Rules,
}

impl FileKind {
    /// Classifies a logical base name (no extension).
    ///
    /// Only the exact names `customdrops` and `rules` are special.
    pub fn from_base_name(name: &str) -> Self {
        match name {
            "customdrops" => Self::CustomDrops,
            "rules" => Self::Rules,
            _ => Self::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::CustomDrops => "customdrops",
            Self::Rules => "rules",
        }
    }

    pub fn is_rules(&self) -> bool {
        matches!(self, Self::Rules)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
