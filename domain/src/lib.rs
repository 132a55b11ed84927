//! Domain layer for lmconfig
//!
//! This crate contains the configuration document model, file identity,
//! schema version handling and the value migration rules. It performs no
//! I/O; reading and writing files is the business of the outer layers.
//!
//! # Core Concepts
//!
//! ## Versioned files
//!
//! Each plugin file declares a `file-version`. When it is older than the
//! version the plugin expects, the file is backed up, regenerated from the
//! packaged default, and the old values are migrated into it.
//!
//! ## File kinds
//!
//! - **Generic**: values copied key by key into the new defaults
//! - **CustomDrops**: user drop groups carried over, legacy layouts rewritten
//! - **Rules**: migrated in place by ordered structural steps

pub mod config;
pub mod core;
pub mod document;
pub mod file;
pub mod markup;
pub mod migration;
pub mod version;

// Re-export commonly used types
pub use config::OutputFormat;
pub use crate::core::error::DomainError;
pub use document::ConfigDocument;
pub use file::{
    CUSTOMDROPS_FILE_VERSION, FileDescriptor, FileKind, MESSAGES_FILE_VERSION, PluginFile,
    RULES_FILE_VERSION, SETTINGS_FILE_VERSION,
};
pub use markup::{ChatColor, StyledSegment, TextFormat, parse_markup, strip_markup};
pub use migration::{
    KeyCopyRules, MigrationPlan, MigrationStrategy, MigrationSummary, RulesMigration,
    copy_values, latest_rules_version, migrate_custom_drops, migrate_rules,
};
pub use version::{VERSION_KEY, VersionStatus, read_version};
