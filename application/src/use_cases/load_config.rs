//! Load config use case
//!
//! This module provides [`LoadConfigUseCase`], which loads one versioned
//! configuration file and migrates it forward when it is outdated.
//!
//! # Overview
//!
//! One call walks through:
//!
//! 1. **Ensure** - create the file from packaged defaults if missing
//! 2. **Validate** - parse the file purely to check YAML syntax
//! 3. **Read version** - the `file-version` marker, 0 when absent
//! 4. **Plan** - [`MigrationPlan::decide`] on kind, version and compatible version
//! 5. **Migrate** - back up, regenerate defaults, copy old values, reload
//!    (or run the rules steps in place, or just check the version)
//!
//! A YAML syntax error is reported to the operator and yields `Ok(None)`;
//! the file is left untouched. Any I/O failure aborts the load with an
//! error.
//!
//! # Usage
//!
//! ```ignore
//! use lmconfig_application::LoadConfigUseCase;
//! use lmconfig_domain::PluginFile;
//!
//! let use_case = LoadConfigUseCase::new(data_dir, store, resources, log);
//! if let Some(loaded) = use_case.load_plugin_file(PluginFile::Settings)? {
//!     println!("settings at v{}", loaded.version);
//! }
//! ```

use super::backup::{BackupManager, BackupRecord};
use super::diagnostics;
use super::migrate_values::{MigrationOutcome, ValueMigrator};
use crate::ports::config_store::ConfigStore;
use crate::ports::default_resources::{DefaultResourceProvider, ResourceError};
use crate::ports::loader_log::LoaderLog;
use lmconfig_domain::{
    ConfigDocument, DomainError, FileDescriptor, MigrationPlan, MigrationStrategy, PluginFile,
    read_version,
};
use serde_yaml::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a load.
///
/// A YAML syntax error in the live file is not among them: it is reported
/// through the [`LoaderLog`] and the load returns `Ok(None)`.
#[derive(Error, Debug)]
pub enum LoadConfigError {
    /// The logical name cannot name a file in the data directory.
    #[error("Invalid config name: {0}")]
    InvalidName(String),

    /// The packaged default could not be materialized.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Reading, writing or copying a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file the migration depends on is not valid YAML.
    #[error("Could not process {} as YAML: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

/// A successfully loaded configuration file.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The final document, reloaded after any migration.
    pub document: ConfigDocument,

    /// The file this document came from.
    pub descriptor: FileDescriptor,

    /// Version marker found before migrating.
    pub installed_version: u32,

    /// Version marker of the final document.
    pub version: u32,

    /// What the load decided to do.
    pub plan: MigrationPlan,

    /// Backup taken before a destructive migration.
    pub backup: Option<BackupRecord>,

    /// Whether the file on disk was rewritten.
    pub migrated: bool,

    /// What the rewrite carried over or changed.
    pub migration: Option<MigrationOutcome>,
}

/// Loads, validates and migrates one configuration file at a time.
///
/// Holds no cache: every call re-reads the file.
pub struct LoadConfigUseCase {
    data_dir: PathBuf,
    store: Arc<dyn ConfigStore>,
    resources: Arc<dyn DefaultResourceProvider>,
    log: Arc<dyn LoaderLog>,
    backups: BackupManager,
    migrator: ValueMigrator,
}

impl LoadConfigUseCase {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        store: Arc<dyn ConfigStore>,
        resources: Arc<dyn DefaultResourceProvider>,
        log: Arc<dyn LoaderLog>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            backups: BackupManager::new(store.clone()),
            migrator: ValueMigrator::new(store.clone()),
            store,
            resources,
            log,
        }
    }

    /// Loads one of the plugin's own files at its expected version.
    pub fn load_plugin_file(
        &self,
        file: PluginFile,
    ) -> Result<Option<LoadedConfig>, LoadConfigError> {
        self.load(file.base_name(), file.compatible_version())
    }

    /// Loads `<data_dir>/<base_name>.yml`, migrating it if it is older than
    /// `compatible_version`.
    ///
    /// Returns `Ok(None)` when the file is not valid YAML.
    pub fn load(
        &self,
        base_name: &str,
        compatible_version: u32,
    ) -> Result<Option<LoadedConfig>, LoadConfigError> {
        let descriptor = FileDescriptor::new(&self.data_dir, base_name)
            .map_err(|_| LoadConfigError::InvalidName(base_name.to_string()))?;
        let file_name = descriptor.file_name();

        self.log.info(&diagnostics::loading(&file_name));
        self.ensure_exists(&descriptor)?;

        let parsed = match self.validate_syntax(descriptor.path())? {
            Ok(value) => value,
            Err(parser_error) => {
                self.log
                    .error(&diagnostics::syntax_error(&file_name, &parser_error.to_string()));
                return Ok(None);
            }
        };

        let document = ConfigDocument::from_value(parsed);
        let installed_version = read_version(&document);
        let plan = MigrationPlan::decide(descriptor.kind(), installed_version, compatible_version);
        debug!(
            file = %file_name,
            installed_version,
            compatible_version,
            ?plan,
            "Resolved migration plan"
        );

        let mut loaded = LoadedConfig {
            version: installed_version,
            document,
            descriptor,
            installed_version,
            plan,
            backup: None,
            migrated: false,
            migration: None,
        };

        match plan {
            MigrationPlan::BackupAndMigrate {
                overwrite_defaults,
                strategy,
            } => self.backup_and_migrate(&mut loaded, overwrite_defaults, strategy)?,
            MigrationPlan::RulesInPlace => self.migrate_rules_in_place(&mut loaded)?,
            MigrationPlan::CheckVersion => {
                self.check_file_version(&file_name, compatible_version, installed_version)
            }
            MigrationPlan::Keep => {}
        }

        Ok(Some(loaded))
    }

    /// Logs a two-line warning when `installed_version` differs from
    /// `compatible_version`. Never changes anything.
    pub fn check_file_version(&self, file_name: &str, compatible_version: u32, installed_version: u32) {
        if let Some(lines) =
            diagnostics::version_mismatch(file_name, installed_version, compatible_version)
        {
            for line in &lines {
                self.log.warn(line);
            }
        }
    }

    fn ensure_exists(&self, descriptor: &FileDescriptor) -> Result<(), LoadConfigError> {
        if self.store.exists(descriptor.path()) {
            return Ok(());
        }

        let file_name = descriptor.file_name();
        self.log.info(&diagnostics::creating(&file_name));
        self.resources
            .ensure(self.store.as_ref(), &file_name, descriptor.path(), false)?;
        Ok(())
    }

    /// Parses the whole file to check its syntax.
    ///
    /// The outer error is an I/O failure opening the file; the inner one is
    /// the parser's complaint.
    fn validate_syntax(
        &self,
        path: &Path,
    ) -> Result<Result<Value, serde_yaml::Error>, LoadConfigError> {
        let reader = self.store.open(path).map_err(|source| LoadConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_reader(reader))
    }

    fn backup_and_migrate(
        &self,
        loaded: &mut LoadedConfig,
        overwrite_defaults: bool,
        strategy: MigrationStrategy,
    ) -> Result<(), LoadConfigError> {
        let descriptor = &loaded.descriptor;
        let file_name = descriptor.file_name();

        let backup = self.backups.backup(descriptor, loaded.installed_version)?;
        self.log
            .info(&diagnostics::backed_up(&file_name, &backup.file_name()));

        if overwrite_defaults {
            self.resources
                .ensure(self.store.as_ref(), &file_name, descriptor.path(), true)?;
        }

        self.log.info(&diagnostics::migrating(&file_name));
        let outcome = match strategy {
            MigrationStrategy::GenericKeyCopy => {
                MigrationOutcome::Values(self.migrator.copy_generic(descriptor, &backup)?)
            }
            MigrationStrategy::CustomDrops => {
                MigrationOutcome::Values(self.migrator.copy_custom_drops(descriptor, &backup)?)
            }
            MigrationStrategy::Rules => {
                MigrationOutcome::Rules(self.migrator.migrate_rules_in_place(descriptor)?)
            }
        };

        if let MigrationOutcome::Values(summary) = &outcome {
            debug!(
                file = %file_name,
                copied = summary.copied.len(),
                dropped = summary.dropped.len(),
                "Carried values into regenerated file"
            );
        } else {
            self.log.warn(&diagnostics::legacy_rules(
                &file_name,
                loaded.installed_version,
                &backup.file_name(),
            ));
        }

        loaded.document = self.reload(descriptor.path())?;
        loaded.version = read_version(&loaded.document);
        loaded.backup = Some(backup);
        loaded.migrated = true;
        loaded.migration = Some(outcome);
        info!(
            file = %file_name,
            from = loaded.installed_version,
            to = loaded.version,
            "Migrated config file"
        );
        Ok(())
    }

    fn migrate_rules_in_place(&self, loaded: &mut LoadedConfig) -> Result<(), LoadConfigError> {
        let migration = self.migrator.migrate_rules_in_place(&loaded.descriptor)?;
        if !migration.changed() {
            return Ok(());
        }

        self.log.info(&diagnostics::rules_migrated(
            &loaded.descriptor.file_name(),
            migration.from,
            migration.to,
        ));
        loaded.document = self.reload(loaded.descriptor.path())?;
        loaded.version = read_version(&loaded.document);
        loaded.migrated = true;
        loaded.migration = Some(MigrationOutcome::Rules(migration));
        Ok(())
    }

    fn reload(&self, path: &Path) -> Result<ConfigDocument, LoadConfigError> {
        let source = self
            .store
            .read_to_string(path)
            .map_err(|source| LoadConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        ConfigDocument::parse(&source).map_err(|source| LoadConfigError::Document {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::loader_log::{BufferedLoaderLog, LogLevel};
    use crate::test_support::{MemoryResources, MemoryStore};

    const SETTINGS_V35: &str = "# settings header\nuse-update-checker: true\nnametag-visible-time: 4000\nnew-in-35: 12\nfile-version: 35\n";
    const CUSTOMDROPS_V10: &str = "defaults:\n  chance: 0.2\n  amount: 1\nZOMBIE:\n  - IRON_INGOT\nfile-version: 10\n";
    const RULES_V4: &str = "default-rule:\n  nametag-visibility-method: [TARGETED]\nfile-version: 4\n";

    struct Harness {
        store: Arc<MemoryStore>,
        log: Arc<BufferedLoaderLog>,
        use_case: LoadConfigUseCase,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::new());
        let resources = Arc::new(
            MemoryResources::new()
                .with("settings.yml", SETTINGS_V35)
                .with("customdrops.yml", CUSTOMDROPS_V10)
                .with("rules.yml", RULES_V4),
        );
        let log = Arc::new(BufferedLoaderLog::new());
        let use_case = LoadConfigUseCase::new("/data", store.clone(), resources, log.clone());
        Harness {
            store,
            log,
            use_case,
        }
    }

    #[test]
    fn test_missing_file_is_created_from_defaults() {
        let h = harness();
        let loaded = h.use_case.load("settings", 35).unwrap().unwrap();

        assert_eq!(h.store.get("/data/settings.yml").as_deref(), Some(SETTINGS_V35));
        assert_eq!(loaded.version, 35);
        assert!(!loaded.migrated);
        assert!(h.log.contains("doesn't exist, creating it now"));
    }

    #[test]
    fn test_current_file_is_returned_without_backup() {
        let h = harness();
        let source = "use-update-checker: false\nfile-version: 35\n";
        h.store.insert("/data/settings.yml", source);

        let loaded = h.use_case.load("settings", 35).unwrap().unwrap();

        assert_eq!(loaded.document, ConfigDocument::parse(source).unwrap());
        assert_eq!(loaded.plan, MigrationPlan::CheckVersion);
        assert!(loaded.backup.is_none());
        assert!(!h.store.contains("/data/settings.yml.v35.old"));
        assert_eq!(h.store.get("/data/settings.yml").as_deref(), Some(source));
        assert!(h.log.plain_messages(LogLevel::Warn).is_empty());
    }

    #[test]
    fn test_outdated_generic_file_is_migrated() {
        let h = harness();
        let old = "# user file\nuse-update-checker: false\nremoved-key: 1\nfile-version: 33\n";
        h.store.insert("/data/settings.yml", old);

        let loaded = h.use_case.load("settings", 35).unwrap().unwrap();

        assert_eq!(h.store.get("/data/settings.yml.v33.old").as_deref(), Some(old));
        let backup = loaded.backup.as_ref().unwrap();
        assert_eq!(backup.version, 33);
        assert!(loaded.migrated);
        assert_eq!(loaded.installed_version, 33);
        assert_eq!(loaded.version, 35);

        let doc = &loaded.document;
        assert_eq!(doc.get("use-update-checker"), Some(&Value::Bool(false)));
        assert_eq!(doc.get_int("nametag-visible-time"), Some(4000));
        assert_eq!(doc.get_int("new-in-35"), Some(12));
        assert!(!doc.contains("removed-key"));
        match loaded.migration.as_ref().unwrap() {
            MigrationOutcome::Values(summary) => {
                assert!(summary.copied.contains(&"use-update-checker".to_string()));
                assert!(summary.dropped.contains(&"removed-key".to_string()));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(h.store.get("/data/settings.yml").unwrap().starts_with("# settings header"));
        assert!(h.log.contains("backed up to settings.yml.v33.old"));
        assert!(h.log.contains("Migrating settings.yml from old version to new version."));
    }

    #[test]
    fn test_second_load_after_migration_is_a_no_op() {
        let h = harness();
        h.store
            .insert("/data/settings.yml", "use-update-checker: false\nfile-version: 30\n");

        let first = h.use_case.load("settings", 35).unwrap().unwrap();
        let writes = h.store.writes();
        let second = h.use_case.load("settings", 35).unwrap().unwrap();

        assert!(first.migrated);
        assert!(!second.migrated);
        assert_eq!(first.document, second.document);
        assert!(second.migration.is_none());
        assert_eq!(h.store.writes(), writes);
        assert!(second.backup.is_none());
    }

    #[test]
    fn test_syntax_error_returns_none_and_leaves_file() {
        let h = harness();
        let broken = "use-update-checker: true\n  nested: [oops\nfile-version: 20\n";
        h.store.insert("/data/settings.yml", broken);

        let result = h.use_case.load("settings", 35).unwrap();

        assert!(result.is_none());
        assert_eq!(h.store.get("/data/settings.yml").as_deref(), Some(broken));
        assert!(!h.store.contains("/data/settings.yml.v20.old"));
        assert_eq!(h.store.writes(), 0);
        let errors = h.log.plain_messages(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("settings.yml"));
        assert!(errors[0].contains("START ERROR"));
    }

    #[test]
    fn test_duplicate_keys_are_a_syntax_error() {
        let h = harness();
        let source = "use-update-checker: true\nuse-update-checker: false\nfile-version: 30\n";
        h.store.insert("/data/settings.yml", source);

        assert!(h.use_case.load("settings", 35).unwrap().is_none());
        assert_eq!(h.store.get("/data/settings.yml").as_deref(), Some(source));
        assert!(!h.store.contains("/data/settings.yml.v30.old"));
        assert_eq!(h.log.plain_messages(LogLevel::Error).len(), 1);
    }

    #[test]
    fn test_ahead_version_only_warns() {
        let h = harness();
        h.store.insert("/data/settings.yml", "file-version: 40\n");

        let loaded = h.use_case.load("settings", 35).unwrap().unwrap();

        assert!(!loaded.migrated);
        let warnings = h.log.plain_messages(LogLevel::Warn);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("ahead of the compatible version"));
        assert!(warnings[1].contains("You have v40 installed"));
    }

    #[test]
    fn test_custom_drops_example_scenario() {
        let h = harness();
        let old = "defaults:\n  chance: 0.5\nSKELETON:\n  - BONE\n  - 12\nCREEPER: nope\nfile-version: 7\n";
        h.store.insert("/data/customdrops.yml", old);

        let loaded = h.use_case.load("customdrops", 10).unwrap().unwrap();

        assert_eq!(h.store.get("/data/customdrops.yml.v7.old").as_deref(), Some(old));
        let doc = &loaded.document;
        assert_eq!(doc.get_int("file-version"), Some(10));
        assert_eq!(doc.get("defaults.chance").and_then(Value::as_f64), Some(0.5));
        assert_eq!(doc.get_int("defaults.amount"), Some(1));
        assert_eq!(
            doc.get("SKELETON").and_then(Value::as_sequence).map(Vec::len),
            Some(1)
        );
        assert!(!doc.contains("CREEPER"));
        assert!(doc.contains("ZOMBIE"));
    }

    #[test]
    fn test_rules_from_version_two_migrate_without_backup() {
        let h = harness();
        h.store.insert(
            "/data/rules.yml",
            "# my rules\ndefault-rule:\n  creature-nametag-always-visible: true\nfile-version: 2\n",
        );

        let loaded = h.use_case.load("rules", 4).unwrap().unwrap();

        assert_eq!(loaded.plan, MigrationPlan::RulesInPlace);
        assert!(loaded.migrated);
        assert!(loaded.backup.is_none());
        assert!(!h.store.contains("/data/rules.yml.v2.old"));
        assert_eq!(loaded.version, 4);
        assert!(matches!(
            loaded.migration,
            Some(MigrationOutcome::Rules(ref steps)) if steps.from == 2 && steps.to == 4
        ));
        assert!(loaded.document.contains("default-rule.nametag-visibility-method"));
        assert!(h.store.get("/data/rules.yml").unwrap().starts_with("# my rules"));
    }

    #[test]
    fn test_current_rules_are_not_rewritten() {
        let h = harness();
        h.store.insert("/data/rules.yml", RULES_V4);

        let loaded = h.use_case.load("rules", 4).unwrap().unwrap();

        assert!(!loaded.migrated);
        assert_eq!(h.store.writes(), 0);
        assert!(h.log.plain_messages(LogLevel::Warn).is_empty());
    }

    #[test]
    fn test_legacy_rules_are_backed_up_but_not_regenerated() {
        let h = harness();
        let old = "default-rule:\n  legacy-flag: true\nfile-version: 1\n";
        h.store.insert("/data/rules.yml", old);

        let loaded = h.use_case.load("rules", 4).unwrap().unwrap();

        assert_eq!(h.store.get("/data/rules.yml.v1.old").as_deref(), Some(old));
        assert!(loaded.document.contains("default-rule.legacy-flag"));
        assert_eq!(loaded.version, 4);
        assert!(h.log.contains("older than any known rules layout"));
    }

    #[test]
    fn test_missing_packaged_default_is_an_error() {
        let h = harness();
        let err = h.use_case.load("messages", 8).unwrap_err();
        assert!(matches!(
            err,
            LoadConfigError::Resource(ResourceError::NotPackaged(_))
        ));
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let h = harness();
        let err = h.use_case.load("../escape", 1).unwrap_err();
        assert!(matches!(err, LoadConfigError::InvalidName(_)));
    }
}
