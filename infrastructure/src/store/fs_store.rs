//! [`ConfigStore`] backed by the local filesystem

use lmconfig_application::ConfigStore;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::trace;

/// Reads and writes configuration files with `std::fs`.
///
/// Parent directories are created on write, so a fresh data directory
/// needs no preparation.
#[derive(Debug, Clone, Default)]
pub struct FsConfigStore;

impl FsConfigStore {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

impl ConfigStore for FsConfigStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        Self::ensure_parent(path)?;
        trace!(path = %path.display(), bytes = contents.len(), "Writing config file");
        fs::write(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        Self::ensure_parent(to)?;
        fs::copy(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plugins").join("LevelledMobs").join("rules.yml");

        let store = FsConfigStore::new();
        assert!(!store.exists(&path));
        store.write(&path, "file-version: 4\n").unwrap();

        assert!(store.exists(&path));
        assert_eq!(store.read_to_string(&path).unwrap(), "file-version: 4\n");
    }

    #[test]
    fn test_copy_replaces_existing_target() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("settings.yml");
        let to = temp.path().join("settings.yml.v30.old");
        fs::write(&from, "new contents\n").unwrap();
        fs::write(&to, "stale\n").unwrap();

        let bytes = FsConfigStore::new().copy(&from, &to).unwrap();

        assert_eq!(bytes, 13);
        assert_eq!(fs::read_to_string(&to).unwrap(), "new contents\n");
    }

    #[test]
    fn test_open_reads_through_handle() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("messages.yml");
        fs::write(&path, "a: 1\n").unwrap();

        let store = FsConfigStore::new();
        let mut text = String::new();
        store.open(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "a: 1\n");
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let temp = TempDir::new().unwrap();
        assert!(!FsConfigStore::new().exists(temp.path()));
        assert!(FsConfigStore::new().open(&temp.path().join("missing.yml")).is_err());
    }
}
