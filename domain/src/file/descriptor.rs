//! File descriptor value object

use super::kind::FileKind;
use crate::core::error::DomainError;
use std::path::{Path, PathBuf};

/// Extension appended to every logical file name.
pub const YAML_EXTENSION: &str = "yml";

/// Suffix of backup files, after the `.v<version>` part.
pub const BACKUP_SUFFIX: &str = "old";

/// A configuration file as seen by one load call.
///
/// Recomputed on every call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    name: String,
    path: PathBuf,
    kind: FileKind,
}

impl FileDescriptor {
    /// Resolves `<data_dir>/<base_name>.yml` and classifies the file.
    pub fn new(data_dir: &Path, base_name: &str) -> Result<Self, DomainError> {
        validate_base_name(base_name)?;
        let path = data_dir.join(format!("{base_name}.{YAML_EXTENSION}"));
        Ok(Self {
            name: base_name.to_string(),
            path,
            kind: FileKind::from_base_name(base_name),
        })
    }

    /// Logical name without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name with extension, e.g. `rules.yml`.
    pub fn file_name(&self) -> String {
        format!("{}.{YAML_EXTENSION}", self.name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Name of the backup taken before migrating away from `version`.
    pub fn backup_file_name(&self, version: u32) -> String {
        format!("{}.v{version}.{BACKUP_SUFFIX}", self.file_name())
    }

    /// Backup path, next to the live file.
    pub fn backup_path(&self, version: u32) -> PathBuf {
        self.path.with_file_name(self.backup_file_name(version))
    }
}

fn validate_base_name(name: &str) -> Result<(), DomainError> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if invalid {
        return Err(DomainError::InvalidFileName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_path_and_kind() {
        let desc = FileDescriptor::new(Path::new("/srv/plugin"), "customdrops").unwrap();
        assert_eq!(desc.name(), "customdrops");
        assert_eq!(desc.file_name(), "customdrops.yml");
        assert_eq!(desc.path(), Path::new("/srv/plugin/customdrops.yml"));
        assert_eq!(desc.kind(), FileKind::CustomDrops);
    }

    #[test]
    fn test_backup_path_sits_next_to_file() {
        let desc = FileDescriptor::new(Path::new("/srv/plugin"), "settings").unwrap();
        assert_eq!(desc.backup_file_name(7), "settings.yml.v7.old");
        assert_eq!(
            desc.backup_path(7),
            PathBuf::from("/srv/plugin/settings.yml.v7.old")
        );
    }

    #[test]
    fn test_rejects_invalid_names() {
        for name in ["", "  ", "..", "a/b", "a\\b"] {
            assert!(
                FileDescriptor::new(Path::new("data"), name).is_err(),
                "name {name:?} should be rejected"
            );
        }
    }
}
