//! Reload configs use case
//!
//! Loads every plugin file in the order the plugin itself does (settings,
//! messages, custom drops, rules) and reports what happened to each.
//!
//! A failure on one file is recorded and the remaining files are still
//! loaded, so the operator sees every problem in one pass.

use super::diagnostics;
use super::load_config::{LoadConfigUseCase, LoadedConfig};
use crate::config::ReloadOptions;
use lmconfig_domain::PluginFile;
use serde::Serialize;
use tracing::{info, warn};

/// What happened to one file during a reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileLoadStatus {
    /// Loaded as found, no changes.
    Loaded { version: u32 },
    /// Migrated forward. `backup` is absent for in-place rules migrations.
    Migrated {
        from: u32,
        to: u32,
        backup: Option<String>,
    },
    /// The file is not valid YAML; left untouched.
    SyntaxError,
    /// The load aborted.
    Failed { message: String },
}

/// Report line for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileLoadReport {
    pub file: PluginFile,
    pub file_name: String,
    #[serde(flatten)]
    pub status: FileLoadStatus,
}

impl FileLoadReport {
    pub fn is_ok(&self) -> bool {
        matches!(
            self.status,
            FileLoadStatus::Loaded { .. } | FileLoadStatus::Migrated { .. }
        )
    }
}

/// Outcome of a full reload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReloadReport {
    pub files: Vec<FileLoadReport>,
    /// Short notice for whoever asked for the reload, set when `rules.yml`
    /// could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ReloadReport {
    pub fn is_success(&self) -> bool {
        self.files.iter().all(FileLoadReport::is_ok)
    }

    pub fn failures(&self) -> usize {
        self.files.iter().filter(|f| !f.is_ok()).count()
    }

    pub fn get(&self, file: PluginFile) -> Option<&FileLoadReport> {
        self.files.iter().find(|f| f.file == file)
    }
}

pub struct ReloadConfigsUseCase {
    loader: LoadConfigUseCase,
}

impl ReloadConfigsUseCase {
    pub fn new(loader: LoadConfigUseCase) -> Self {
        Self { loader }
    }

    pub fn execute(&self, options: &ReloadOptions) -> ReloadReport {
        let mut report = ReloadReport::default();

        for file in PluginFile::ALL {
            if file == PluginFile::CustomDrops && !options.include_custom_drops {
                continue;
            }

            let status = match self.loader.load_plugin_file(file) {
                Ok(Some(loaded)) => status_of(&loaded),
                Ok(None) => FileLoadStatus::SyntaxError,
                Err(e) => {
                    warn!(file = %file, error = %e, "Failed to load config file");
                    FileLoadStatus::Failed {
                        message: e.to_string(),
                    }
                }
            };

            if file == PluginFile::Rules && status == FileLoadStatus::SyntaxError {
                report.notice = Some(diagnostics::rules_load_error_notice().to_string());
            }
            report.files.push(FileLoadReport {
                file,
                file_name: format!("{}.yml", file.base_name()),
                status,
            });
        }

        info!(
            files = report.files.len(),
            failures = report.failures(),
            "Reload finished"
        );
        report
    }
}

fn status_of(loaded: &LoadedConfig) -> FileLoadStatus {
    if loaded.migrated {
        FileLoadStatus::Migrated {
            from: loaded.installed_version,
            to: loaded.version,
            backup: loaded.backup.as_ref().map(|b| b.file_name()),
        }
    } else {
        FileLoadStatus::Loaded {
            version: loaded.version,
        }
    }
}
