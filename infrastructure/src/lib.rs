//! Infrastructure layer for lmconfig
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod resources;
pub mod store;


// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigOverrides, ConfigValidationError, DEFAULT_DATA_DIR, OutputSettings,
    ToolConfig,
};
pub use logging::{LOADER_TARGET, TracingLoaderLog};
pub use resources::{DirectoryResources, EmbeddedResources};
pub use store::FsConfigStore;
