//! Deciding what a load does with a file's version

use crate::file::FileKind;
use serde::Serialize;

/// Rules files at or above this version migrate themselves in place.
pub const RULES_SELF_MIGRATING_VERSION: u32 = 2;

/// Value migration strategy, one per file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStrategy {
    GenericKeyCopy,
    CustomDrops,
    Rules,
}

impl From<FileKind> for MigrationStrategy {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Generic => Self::GenericKeyCopy,
            FileKind::CustomDrops => Self::CustomDrops,
            FileKind::Rules => Self::Rules,
        }
    }
}

/// What a single load call does after reading the version marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MigrationPlan {
    /// Back up the file, regenerate defaults if asked, migrate values, reload.
    BackupAndMigrate {
        overwrite_defaults: bool,
        strategy: MigrationStrategy,
    },
    /// Run the rules steps on the live file. No backup, no regeneration.
    RulesInPlace,
    /// Keep the document and warn if its version differs from the expected one.
    CheckVersion,
    /// Keep the document without any check.
    Keep,
}

impl MigrationPlan {
    /// Picks the plan for a file of `kind` declaring `file_version`.
    ///
    /// A file migrates when it is older than `compatible`, except rules
    /// files at version 2 or later, which always take the in-place path.
    pub fn decide(kind: FileKind, file_version: u32, compatible: u32) -> Self {
        let rules_self_migrating =
            kind.is_rules() && file_version >= RULES_SELF_MIGRATING_VERSION;

        if file_version < compatible && !rules_self_migrating {
            Self::BackupAndMigrate {
                overwrite_defaults: !kind.is_rules(),
                strategy: kind.into(),
            }
        } else if rules_self_migrating {
            Self::RulesInPlace
        } else if kind.is_rules() {
            Self::Keep
        } else {
            Self::CheckVersion
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_outdated_migrates_with_defaults() {
        assert_eq!(
            MigrationPlan::decide(FileKind::Generic, 30, 35),
            MigrationPlan::BackupAndMigrate {
                overwrite_defaults: true,
                strategy: MigrationStrategy::GenericKeyCopy,
            }
        );
    }

    #[test]
    fn test_custom_drops_outdated_uses_dedicated_strategy() {
        assert_eq!(
            MigrationPlan::decide(FileKind::CustomDrops, 7, 10),
            MigrationPlan::BackupAndMigrate {
                overwrite_defaults: true,
                strategy: MigrationStrategy::CustomDrops,
            }
        );
    }

    #[test]
    fn test_current_or_ahead_only_checks() {
        assert_eq!(
            MigrationPlan::decide(FileKind::Generic, 35, 35),
            MigrationPlan::CheckVersion
        );
        assert_eq!(
            MigrationPlan::decide(FileKind::CustomDrops, 11, 10),
            MigrationPlan::CheckVersion
        );
    }

    #[test]
    fn test_rules_from_version_two_migrate_in_place() {
        for version in [2, 3, 4, 9] {
            let plan = MigrationPlan::decide(FileKind::Rules, version, 4);
            assert_eq!(plan, MigrationPlan::RulesInPlace);
        }
    }

    #[test]
    fn test_legacy_rules_back_up_without_regenerating() {
        let plan = MigrationPlan::decide(FileKind::Rules, 1, 4);
        assert_eq!(
            plan,
            MigrationPlan::BackupAndMigrate {
                overwrite_defaults: false,
                strategy: MigrationStrategy::Rules,
            }
        );
    }

    #[test]
    fn test_legacy_rules_not_behind_are_kept() {
        assert_eq!(MigrationPlan::decide(FileKind::Rules, 1, 1), MigrationPlan::Keep);
        assert_eq!(MigrationPlan::decide(FileKind::Rules, 0, 0), MigrationPlan::Keep);
    }
}
