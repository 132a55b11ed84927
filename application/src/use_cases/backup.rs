//! Pre-migration backups
//!
//! Before any destructive step, the live file is copied byte for byte to
//! `<name>.yml.v<version>.old` next to it. Backups are never cleaned up.

use super::load_config::LoadConfigError;
use crate::ports::config_store::ConfigStore;
use lmconfig_domain::FileDescriptor;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A backup written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupRecord {
    /// File the backup was taken from
    pub source: PathBuf,
    /// Backup location
    pub path: PathBuf,
    /// Version of the file when it was backed up
    pub version: u32,
    /// Bytes copied
    pub bytes: u64,
}

impl BackupRecord {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Copies live files to their versioned backup path.
pub struct BackupManager {
    store: Arc<dyn ConfigStore>,
}

impl BackupManager {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Backs up `descriptor`'s file as it stands at `version`.
    ///
    /// An existing backup for the same version is replaced.
    pub fn backup(
        &self,
        descriptor: &FileDescriptor,
        version: u32,
    ) -> Result<BackupRecord, LoadConfigError> {
        let path = descriptor.backup_path(version);
        let bytes = self
            .store
            .copy(descriptor.path(), &path)
            .map_err(|source| LoadConfigError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(backup = %path.display(), bytes, "Backed up config file");

        Ok(BackupRecord {
            source: descriptor.path().to_path_buf(),
            path,
            version,
            bytes,
        })
    }
}
