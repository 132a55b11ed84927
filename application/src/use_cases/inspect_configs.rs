//! Inspect configs use case
//!
//! Reports, for each plugin file, the installed version and what a load
//! would do with it. Nothing is created or written.

use super::load_config::LoadConfigError;
use crate::ports::config_store::ConfigStore;
use lmconfig_domain::{
    ConfigDocument, FileDescriptor, MigrationPlan, PluginFile, VersionStatus,
    latest_rules_version, read_version,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Read-only state of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FileState {
    /// Not on disk; a load would create it from defaults.
    Missing,
    /// Not valid YAML; a load would leave it alone.
    SyntaxError { message: String },
    /// Parsed, with the plan a load would follow.
    Present {
        installed_version: u32,
        status: VersionStatus,
        plan: MigrationPlan,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileStatusReport {
    pub file: PluginFile,
    pub path: PathBuf,
    pub compatible_version: u32,
    #[serde(flatten)]
    pub state: FileState,
}

impl FileStatusReport {
    /// Whether a load would rewrite the file.
    ///
    /// Rules files from version 2 on are rewritten in place only while
    /// steps newer than their version remain.
    pub fn needs_migration(&self) -> bool {
        match self.state {
            FileState::Present {
                plan: MigrationPlan::BackupAndMigrate { .. },
                ..
            } => true,
            FileState::Present {
                plan: MigrationPlan::RulesInPlace,
                installed_version,
                ..
            } => installed_version < latest_rules_version(),
            _ => false,
        }
    }
}

pub struct InspectConfigsUseCase {
    data_dir: PathBuf,
    store: Arc<dyn ConfigStore>,
}

impl InspectConfigsUseCase {
    pub fn new(data_dir: impl Into<PathBuf>, store: Arc<dyn ConfigStore>) -> Self {
        Self {
            data_dir: data_dir.into(),
            store,
        }
    }

    pub fn execute(&self) -> Result<Vec<FileStatusReport>, LoadConfigError> {
        PluginFile::ALL
            .into_iter()
            .map(|file| self.inspect(file))
            .collect()
    }

    pub fn inspect(&self, file: PluginFile) -> Result<FileStatusReport, LoadConfigError> {
        let descriptor = FileDescriptor::new(&self.data_dir, file.base_name())
            .map_err(|_| LoadConfigError::InvalidName(file.base_name().to_string()))?;
        let compatible_version = file.compatible_version();

        let state = if !self.store.exists(descriptor.path()) {
            FileState::Missing
        } else {
            let parsed = {
                let reader =
                    self.store
                        .open(descriptor.path())
                        .map_err(|source| LoadConfigError::Io {
                            path: descriptor.path().to_path_buf(),
                            source,
                        })?;
                serde_yaml::from_reader(reader)
            };
            match parsed {
                Ok(value) => {
                    let installed_version = read_version(&ConfigDocument::from_value(value));
                    FileState::Present {
                        installed_version,
                        status: VersionStatus::compare(installed_version, compatible_version),
                        plan: MigrationPlan::decide(
                            descriptor.kind(),
                            installed_version,
                            compatible_version,
                        ),
                    }
                }
                Err(e) => FileState::SyntaxError {
                    message: e.to_string(),
                },
            }
        };

        Ok(FileStatusReport {
            file,
            path: descriptor.path().to_path_buf(),
            compatible_version,
            state,
        })
    }
}
