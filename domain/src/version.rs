//! Schema version markers
//!
//! Every plugin configuration file carries an integer `file-version` at its
//! root. A missing or unreadable marker means "oldest known version" (0).

use crate::document::ConfigDocument;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Root key holding the schema version marker.
pub const VERSION_KEY: &str = "file-version";

/// Reads the schema version marker of a document.
///
/// Absent, negative and non-numeric markers all read as 0.
pub fn read_version(document: &ConfigDocument) -> u32 {
    document
        .get_int(VERSION_KEY)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// How an installed file version relates to the compatible one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Current,
    Outdated,
    Ahead,
}

impl VersionStatus {
    pub fn compare(installed: u32, compatible: u32) -> Self {
        match installed.cmp(&compatible) {
            Ordering::Equal => Self::Current,
            Ordering::Less => Self::Outdated,
            Ordering::Greater => Self::Ahead,
        }
    }

    /// Qualitative wording used in mismatch warnings.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Outdated => "outdated",
            Self::Ahead => {
                "ahead of the compatible version of this file for this version of the plugin"
            }
        }
    }
}
