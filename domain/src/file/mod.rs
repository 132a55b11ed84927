//! Configuration file identity
//!
//! Which file is being loaded, where it lives, and which migration policy
//! its kind selects.

mod descriptor;
mod kind;
mod plugin_file;

pub use descriptor::{BACKUP_SUFFIX, FileDescriptor, YAML_EXTENSION};
pub use kind::FileKind;
pub use plugin_file::{
    CUSTOMDROPS_FILE_VERSION, MESSAGES_FILE_VERSION, PluginFile, RULES_FILE_VERSION,
    SETTINGS_FILE_VERSION,
};
