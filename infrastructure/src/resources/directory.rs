//! Defaults read from a directory

use lmconfig_application::{DefaultResourceProvider, ResourceError};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Reads packaged defaults from `<root>/<file_name>`.
///
/// Useful for testing a migration against the defaults of a different
/// plugin build.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DefaultResourceProvider for DirectoryResources {
    fn packaged_default(&self, file_name: &str) -> Result<String, ResourceError> {
        let path = self.root.join(file_name);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ResourceError::NotPackaged(file_name.to_string()),
            _ => ResourceError::Read {
                name: file_name.to_string(),
                source,
            },
        })
    }
}
