//! Filesystem access to configuration files

mod fs_store;

pub use fs_store::FsConfigStore;
