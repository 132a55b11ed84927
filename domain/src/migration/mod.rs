//! Value migration between schema versions
//!
//! When a file falls behind the version the plugin expects, its values are
//! carried into the freshly regenerated default file. How that happens
//! depends on the file kind:
//!
//! - [`copy_values`]: generic key copy for ordinary files
//! - [`migrate_custom_drops`]: structural migration for `customdrops.yml`
//! - [`migrate_rules`]: in-place step migration for `rules.yml`
//!
//! [`MigrationPlan::decide`] picks which path one load takes.

mod custom_drops;
mod generic;
mod plan;
mod rules;
mod summary;

pub use custom_drops::{LIST_LAYOUT_VERSION, migrate_custom_drops};
pub use generic::{KeyCopyRules, KeyRename, copy_values};
pub use plan::{MigrationPlan, MigrationStrategy, RULES_SELF_MIGRATING_VERSION};
pub use rules::{
    FINE_TUNING_ATTRIBUTES, RULES_STEPS, RulesMigration, RulesStep, latest_rules_version,
    migrate_rules,
};
pub use summary::MigrationSummary;

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
