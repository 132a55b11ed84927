//! Config store port
//!
//! Defines the file access the loader needs. The filesystem adapter lives in
//! the infrastructure layer; tests use an in-memory store.

use std::io::{self, Read};
use std::path::Path;

/// Blocking access to configuration files.
///
/// No locking is done: callers serialize loads of the same path.
pub trait ConfigStore: Send + Sync {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Opens a file for reading. The handle is closed when dropped.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Reads a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Creates or replaces a file with `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Copies a file byte for byte, replacing `to`. Returns the bytes copied.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;
}
