//! Application-level configuration.
//!
//! Options that change which files a use case touches. Where the data
//! directory is and how output looks belong to the infrastructure config.

/// Options for reloading the full set of plugin files.
#[derive(Debug, Clone)]
pub struct ReloadOptions {
    /// Load `customdrops.yml` as well. Servers with custom drops disabled
    /// never read it.
    pub include_custom_drops: bool,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self {
            include_custom_drops: true,
        }
    }
}

impl ReloadOptions {
    pub fn without_custom_drops() -> Self {
        Self {
            include_custom_drops: false,
        }
    }
}
