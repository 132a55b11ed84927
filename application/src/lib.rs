//! Application layer for lmconfig
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::ReloadOptions;
pub use ports::{
    config_store::ConfigStore,
    default_resources::{DefaultResourceProvider, ResourceError},
    loader_log::{BufferedLoaderLog, LogLevel, LogRecord, LoaderLog, NoLoaderLog},
};
pub use use_cases::backup::{BackupManager, BackupRecord};
pub use use_cases::inspect_configs::{FileState, FileStatusReport, InspectConfigsUseCase};
pub use use_cases::load_config::{LoadConfigError, LoadConfigUseCase, LoadedConfig};
pub use use_cases::migrate_values::{MigrationOutcome, ValueMigrator};
pub use use_cases::reload_configs::{
    FileLoadReport, FileLoadStatus, ReloadConfigsUseCase, ReloadReport,
};
