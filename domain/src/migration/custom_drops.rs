//! Custom drops migration
//!
//! `customdrops.yml` is mostly user data: every top-level key other than
//! `defaults`, `drop-table` and the version marker names a mob type or mob
//! group, and holds that group's list of drop entries.
//!
//! ```yaml
//! ZOMBIE:
//!   - overall_chance: 0.5
//!   - DIAMOND:
//!       chance: 0.1
//!       amount: 1
//! ```
//!
//! Before [`LIST_LAYOUT_VERSION`] a group was a mapping of material to
//! properties; those are rewritten as one-key list entries. Anything that
//! fits neither layout is dropped.

use super::generic::{KeyCopyRules, KeyRename, copy_mapping};
use super::join_path;
use super::summary::MigrationSummary;
use crate::document::{ConfigDocument, key_to_string};
use crate::version::VERSION_KEY;
use serde_yaml::{Mapping, Value};
use tracing::trace;

/// First custom drops version that stores mob groups as lists.
pub const LIST_LAYOUT_VERSION: u32 = 6;

const DEFAULTS_KEY: &str = "defaults";
const DROP_TABLE_KEY: &str = "drop-table";

const ENTRY_RENAMES: &[KeyRename] = &[
    KeyRename {
        introduced_in: 9,
        from: "nomultiplier",
        to: "no-multiplier",
    },
    KeyRename {
        introduced_in: 9,
        from: "nospawner",
        to: "no-spawner",
    },
];

/// Migrates an old custom drops document into the regenerated default.
///
/// `defaults` is copied key by key. Drop tables and mob groups from the old
/// file replace packaged ones of the same name; packaged groups the user
/// never defined stay as shipped.
pub fn migrate_custom_drops(
    old: &ConfigDocument,
    new: &mut ConfigDocument,
    old_version: u32,
) -> MigrationSummary {
    let mut summary = MigrationSummary::new();
    let version_last = new
        .root()
        .keys()
        .last()
        .and_then(Value::as_str)
        .is_some_and(|k| k == VERSION_KEY);

    for (key, old_value) in old.root() {
        let Some(name) = key_to_string(key) else {
            continue;
        };
        if name.eq_ignore_ascii_case(VERSION_KEY) {
            continue;
        }

        match name.as_str() {
            DEFAULTS_KEY => migrate_defaults(old_value, new.root_mut(), &mut summary),
            DROP_TABLE_KEY => {
                migrate_drop_tables(old_value, new.root_mut(), old_version, &mut summary)
            }
            _ => match normalize_group(old_value, old_version, &name, &mut summary) {
                Some(group) => {
                    new.root_mut().insert(key.clone(), group);
                    summary.copied(name);
                }
                None => {
                    trace!(group = %name, "Dropping incompatible custom drops group");
                    summary.dropped(name);
                }
            },
        }
    }

    if version_last {
        move_to_end(new.root_mut(), VERSION_KEY);
    }
    summary
}

fn migrate_defaults(old_value: &Value, new_root: &mut Mapping, summary: &mut MigrationSummary) {
    match (old_value, new_root.get_mut(DEFAULTS_KEY)) {
        (Value::Mapping(old_map), Some(Value::Mapping(new_map))) => {
            copy_mapping(old_map, new_map, DEFAULTS_KEY, &KeyCopyRules::NONE, summary);
        }
        _ => summary.dropped(DEFAULTS_KEY),
    }
}

fn migrate_drop_tables(
    old_value: &Value,
    new_root: &mut Mapping,
    old_version: u32,
    summary: &mut MigrationSummary,
) {
    let Value::Mapping(old_tables) = old_value else {
        summary.dropped(DROP_TABLE_KEY);
        return;
    };

    let mut tables = match new_root.get(DROP_TABLE_KEY) {
        Some(Value::Mapping(existing)) => existing.clone(),
        _ => Mapping::new(),
    };

    for (table, drops) in old_tables {
        let Some(table_name) = key_to_string(table) else {
            continue;
        };
        let path = join_path(DROP_TABLE_KEY, &table_name);
        match normalize_group(drops, old_version, &path, summary) {
            Some(group) => {
                tables.insert(table.clone(), group);
                summary.copied(path);
            }
            None => summary.dropped(path),
        }
    }

    new_root.insert(Value::from(DROP_TABLE_KEY), Value::Mapping(tables));
}

/// Brings one mob group or drop table into the list layout.
fn normalize_group(
    value: &Value,
    old_version: u32,
    path: &str,
    summary: &mut MigrationSummary,
) -> Option<Value> {
    let entries: Vec<Value> = match value {
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                normalize_entry(item, old_version, &format!("{path}[{index}]"), summary)
            })
            .collect(),
        Value::Mapping(map) if old_version < LIST_LAYOUT_VERSION => {
            summary.restructured(path);
            map.iter()
                .filter_map(|(material, props)| {
                    let mut entry = Mapping::new();
                    entry.insert(material.clone(), props.clone());
                    let entry_path = join_path(path, &key_to_string(material)?);
                    normalize_entry(&Value::Mapping(entry), old_version, &entry_path, summary)
                })
                .collect()
        }
        _ => return None,
    };
    Some(Value::Sequence(entries))
}

/// Keeps a drop entry if it is a bare material name or a mapping.
fn normalize_entry(
    item: &Value,
    old_version: u32,
    path: &str,
    summary: &mut MigrationSummary,
) -> Option<Value> {
    match item {
        Value::String(_) => Some(item.clone()),
        Value::Mapping(entry) => {
            let mut out = Mapping::new();
            for (material, props) in entry {
                let props = match props {
                    Value::Mapping(props) => {
                        Value::Mapping(rename_properties(props, old_version, path, summary))
                    }
                    other => other.clone(),
                };
                out.insert(material.clone(), props);
            }
            Some(Value::Mapping(out))
        }
        _ => {
            summary.dropped(path);
            None
        }
    }
}

fn rename_properties(
    props: &Mapping,
    old_version: u32,
    path: &str,
    summary: &mut MigrationSummary,
) -> Mapping {
    props
        .iter()
        .map(|(key, value)| {
            let renamed = key.as_str().and_then(|name| {
                ENTRY_RENAMES
                    .iter()
                    .find(|r| old_version < r.introduced_in && r.from == name)
            });
            match renamed {
                Some(rename) => {
                    summary.renamed(&join_path(path, rename.from), &join_path(path, rename.to));
                    (Value::from(rename.to), value.clone())
                }
                None => (key.clone(), value.clone()),
            }
        })
        .collect()
}

fn move_to_end(map: &mut Mapping, key: &str) {
    if let Some(value) = map.remove(key) {
        map.insert(Value::from(key), value);
    }
}
