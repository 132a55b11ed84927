//! Generic key copy
//!
//! Walks the old document and writes each value into the new document when
//! the new document has the same key. Keys the new document does not know
//! are dropped; keys only the new document has keep their packaged default.
//! The version marker is never copied.

use super::join_path;
use super::summary::MigrationSummary;
use crate::document::{ConfigDocument, key_to_string};
use crate::version::VERSION_KEY;
use serde_yaml::{Mapping, Value};
use tracing::trace;

/// A key that moved to a new path in some file version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRename {
    /// First file version using `to`
    pub introduced_in: u32,
    pub from: &'static str,
    pub to: &'static str,
}

/// Per-file adjustments to the generic copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyCopyRules {
    /// Renames applied to the old document before copying
    pub renames: &'static [KeyRename],
    /// Sections whose children are user-defined and copied wholesale
    pub open_sections: &'static [&'static str],
}

const SETTINGS_RENAMES: &[KeyRename] = &[
    KeyRename {
        introduced_in: 30,
        from: "creature-nametag-visible-time",
        to: "nametag-visible-time",
    },
    KeyRename {
        introduced_in: 33,
        from: "kill-skip-conditions.isNametagged",
        to: "kill-skip-conditions.nametagged",
    },
];

const SETTINGS_OPEN_SECTIONS: &[&str] = &["mob-display-names"];

impl KeyCopyRules {
    pub const NONE: KeyCopyRules = KeyCopyRules {
        renames: &[],
        open_sections: &[],
    };

    /// Rules for a file by logical name.
    pub fn for_file(name: &str) -> Self {
        match name {
            "settings" => KeyCopyRules {
                renames: SETTINGS_RENAMES,
                open_sections: SETTINGS_OPEN_SECTIONS,
            },
            _ => Self::NONE,
        }
    }

    fn is_open_section(&self, path: &str) -> bool {
        self.open_sections.iter().any(|s| *s == path)
    }
}

/// Copies compatible values from `old` into `new`.
///
/// `old_version` selects which renames apply: a rename introduced in a
/// version newer than the old file is applied before copying.
pub fn copy_values(
    old: &ConfigDocument,
    new: &mut ConfigDocument,
    old_version: u32,
    rules: &KeyCopyRules,
) -> MigrationSummary {
    let mut summary = MigrationSummary::new();

    let mut source = old.clone();
    for rename in rules.renames {
        if old_version >= rename.introduced_in {
            continue;
        }
        if let Some(value) = source.remove(rename.from) {
            source.set(rename.to, value);
            summary.renamed(rename.from, rename.to);
        }
    }

    copy_mapping(source.root(), new.root_mut(), "", rules, &mut summary);
    summary
}

/// Copies `old` into `new` one key at a time, recursing into mappings
/// present on both sides.
pub(crate) fn copy_mapping(
    old: &Mapping,
    new: &mut Mapping,
    prefix: &str,
    rules: &KeyCopyRules,
    summary: &mut MigrationSummary,
) {
    for (key, old_value) in old {
        let Some(name) = key_to_string(key) else {
            continue;
        };
        let path = join_path(prefix, &name);

        if prefix.is_empty() && name.eq_ignore_ascii_case(VERSION_KEY) {
            continue;
        }

        let Some(new_value) = new.get_mut(key) else {
            trace!(path = %path, "Dropping key unknown to the new file");
            summary.dropped(path);
            continue;
        };

        if rules.is_open_section(&path) {
            *new_value = old_value.clone();
            summary.copied(path);
            continue;
        }

        match (old_value, new_value) {
            (Value::Mapping(old_map), Value::Mapping(new_map)) => {
                copy_mapping(old_map, new_map, &path, rules, summary);
            }
            (Value::Mapping(_), _) | (_, Value::Mapping(_)) => {
                trace!(path = %path, "Dropping structurally incompatible value");
                summary.dropped(path);
            }
            (old_value, new_value) => {
                *new_value = old_value.clone();
                summary.copied(path);
            }
        }
    }
}
