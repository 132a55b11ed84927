//! In-memory adapters for use case tests.

use crate::ports::config_store::ConfigStore;
use crate::ports::default_resources::{DefaultResourceProvider, ResourceError};
use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Files kept in a map. Only [`ConfigStore::write`] counts as a write.
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file without counting a write.
    pub fn insert(&self, path: impl AsRef<Path>, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), contents.to_string());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.lock().unwrap().contains_key(path.as_ref())
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )
    }
}

impl ConfigStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.contains(path)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let contents = self.get(path).ok_or_else(|| Self::not_found(path))?;
        Ok(Box::new(Cursor::new(contents.into_bytes())))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.get(path).ok_or_else(|| Self::not_found(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.insert(path, contents);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let contents = self.get(from).ok_or_else(|| Self::not_found(from))?;
        let bytes = contents.len() as u64;
        self.insert(to, &contents);
        Ok(bytes)
    }
}

/// Packaged defaults keyed by file name.
#[derive(Default)]
pub struct MemoryResources {
    files: HashMap<String, String>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file_name: &str, contents: &str) -> Self {
        self.files
            .insert(file_name.to_string(), contents.to_string());
        self
    }
}

impl DefaultResourceProvider for MemoryResources {
    fn packaged_default(&self, file_name: &str) -> Result<String, ResourceError> {
        self.files
            .get(file_name)
            .cloned()
            .ok_or_else(|| ResourceError::NotPackaged(file_name.to_string()))
    }
}
