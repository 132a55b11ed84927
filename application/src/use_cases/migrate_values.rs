//! Value migration against stored files
//!
//! Reads the documents a migration strategy needs, runs the pure transform
//! from the domain layer, and writes the result back to the live file. The
//! leading comment block of the file being rewritten is kept.

use super::backup::BackupRecord;
use super::load_config::LoadConfigError;
use crate::ports::config_store::ConfigStore;
use lmconfig_domain::document::leading_comments;
use lmconfig_domain::{
    ConfigDocument, FileDescriptor, KeyCopyRules, MigrationSummary, RulesMigration,
    copy_values, migrate_custom_drops, migrate_rules,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Result of one migration, by strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// Generic or custom drops copy from the backup
    Values(MigrationSummary),
    /// Rules steps run on the live file
    Rules(RulesMigration),
}

/// Runs migration strategies over files in a [`ConfigStore`].
pub struct ValueMigrator {
    store: Arc<dyn ConfigStore>,
}

impl ValueMigrator {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Generic key copy from the backup into the regenerated live file.
    pub fn copy_generic(
        &self,
        descriptor: &FileDescriptor,
        backup: &BackupRecord,
    ) -> Result<MigrationSummary, LoadConfigError> {
        let old = self.read_document(&backup.path)?;
        let (header, mut new) = self.read_with_header(descriptor.path())?;

        let rules = KeyCopyRules::for_file(descriptor.name());
        let summary = copy_values(&old, &mut new, backup.version, &rules);

        self.write_document(descriptor.path(), &new, &header)?;
        debug!(
            file = descriptor.name(),
            copied = summary.copied.len(),
            dropped = ?summary.dropped,
            renamed = ?summary.renamed,
            "Generic key copy finished"
        );
        Ok(summary)
    }

    /// Custom drops migration from the backup into the regenerated live file.
    pub fn copy_custom_drops(
        &self,
        descriptor: &FileDescriptor,
        backup: &BackupRecord,
    ) -> Result<MigrationSummary, LoadConfigError> {
        let old = self.read_document(&backup.path)?;
        let (header, mut new) = self.read_with_header(descriptor.path())?;

        let summary = migrate_custom_drops(&old, &mut new, backup.version);

        self.write_document(descriptor.path(), &new, &header)?;
        debug!(
            file = descriptor.name(),
            copied = summary.copied.len(),
            dropped = ?summary.dropped,
            restructured = ?summary.restructured,
            "Custom drops migration finished"
        );
        Ok(summary)
    }

    /// Rules steps applied to the live file. Nothing is written when no
    /// step applies.
    pub fn migrate_rules_in_place(
        &self,
        descriptor: &FileDescriptor,
    ) -> Result<RulesMigration, LoadConfigError> {
        let (header, mut document) = self.read_with_header(descriptor.path())?;

        let migration = migrate_rules(&mut document);
        if migration.changed() {
            self.write_document(descriptor.path(), &document, &header)?;
        }
        debug!(
            file = descriptor.name(),
            from = migration.from,
            to = migration.to,
            steps = migration.applied.len(),
            "Rules migration finished"
        );
        Ok(migration)
    }

    fn read_document(&self, path: &Path) -> Result<ConfigDocument, LoadConfigError> {
        self.read_with_header(path).map(|(_, document)| document)
    }

    fn read_with_header(&self, path: &Path) -> Result<(String, ConfigDocument), LoadConfigError> {
        let source = self
            .store
            .read_to_string(path)
            .map_err(|source| LoadConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let document =
            ConfigDocument::parse(&source).map_err(|source| LoadConfigError::Document {
                path: path.to_path_buf(),
                source,
            })?;
        Ok((leading_comments(&source).to_string(), document))
    }

    fn write_document(
        &self,
        path: &Path,
        document: &ConfigDocument,
        header: &str,
    ) -> Result<(), LoadConfigError> {
        let text = document
            .to_yaml_with_header(header)
            .map_err(|source| LoadConfigError::Document {
                path: path.to_path_buf(),
                source,
            })?;
        self.store
            .write(path, &text)
            .map_err(|source| LoadConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStore;
    use std::path::PathBuf;

    fn backup_record(path: &str, version: u32) -> BackupRecord {
        BackupRecord {
            source: PathBuf::from("/data/settings.yml"),
            path: PathBuf::from(path),
            version,
            bytes: 0,
        }
    }

    #[test]
    fn test_generic_copy_keeps_destination_header() {
        let store = Arc::new(MemoryStore::new());
        store.insert("/data/settings.yml.v30.old", "use-update-checker: false\nfile-version: 30\n");
        store.insert(
            "/data/settings.yml",
            "# packaged header\n# second line\nuse-update-checker: true\nfile-version: 35\n",
        );

        let migrator = ValueMigrator::new(store.clone());
        let descriptor = FileDescriptor::new(Path::new("/data"), "settings").unwrap();
        let summary = migrator
            .copy_generic(&descriptor, &backup_record("/data/settings.yml.v30.old", 30))
            .unwrap();

        assert_eq!(summary.copied, vec!["use-update-checker".to_string()]);
        let written = store.get("/data/settings.yml").unwrap();
        assert!(written.starts_with("# packaged header\n# second line\n"));
        let doc = ConfigDocument::parse(&written).unwrap();
        assert_eq!(doc.get_int("file-version"), Some(35));
        assert_eq!(doc.get("use-update-checker"), Some(&serde_yaml::Value::Bool(false)));
    }

    #[test]
    fn test_rules_in_place_skips_write_when_current() {
        let store = Arc::new(MemoryStore::new());
        let source = "# my rules\ndefault-rule:\n  enabled: true   # trailing comment\nfile-version: 4\n";
        store.insert("/data/rules.yml", source);

        let migrator = ValueMigrator::new(store.clone());
        let descriptor = FileDescriptor::new(Path::new("/data"), "rules").unwrap();
        let migration = migrator.migrate_rules_in_place(&descriptor).unwrap();

        assert!(!migration.changed());
        assert_eq!(store.get("/data/rules.yml").as_deref(), Some(source));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_unreadable_backup_is_a_document_error() {
        let store = Arc::new(MemoryStore::new());
        store.insert("/data/settings.yml.v1.old", "key: [unclosed\n");
        store.insert("/data/settings.yml", "key: 1\nfile-version: 35\n");

        let migrator = ValueMigrator::new(store);
        let descriptor = FileDescriptor::new(Path::new("/data"), "settings").unwrap();
        let err = migrator
            .copy_generic(&descriptor, &backup_record("/data/settings.yml.v1.old", 1))
            .unwrap_err();
        assert!(matches!(err, LoadConfigError::Document { .. }));
    }
}
