//! Default resource port
//!
//! The plugin ships a default copy of every configuration file. A missing
//! file is created from it, and an outdated one is overwritten with it
//! before old values are migrated in.

use super::config_store::ConfigStore;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while materializing packaged defaults.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("No packaged default for {0}")]
    NotPackaged(String),

    #[error("Failed to read packaged default {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Supplier of packaged default file content.
pub trait DefaultResourceProvider: Send + Sync {
    /// Returns the packaged content for a file name such as `rules.yml`.
    fn packaged_default(&self, file_name: &str) -> Result<String, ResourceError>;

    /// Writes the packaged default for `file_name` to `target`.
    ///
    /// With `force == false` an existing file is left alone. Returns whether
    /// the file was written.
    fn ensure(
        &self,
        store: &dyn ConfigStore,
        file_name: &str,
        target: &Path,
        force: bool,
    ) -> Result<bool, ResourceError> {
        if !force && store.exists(target) {
            return Ok(false);
        }

        let content = self.packaged_default(file_name)?;
        store
            .write(target, &content)
            .map_err(|source| ResourceError::Write {
                path: target.to_path_buf(),
                source,
            })?;
        Ok(true)
    }
}
