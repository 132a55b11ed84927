//! Defaults compiled into the binary

use lmconfig_application::{DefaultResourceProvider, ResourceError};

const PACKAGED: [(&str, &str); 4] = [
    ("settings.yml", include_str!("../../resources/settings.yml")),
    ("messages.yml", include_str!("../../resources/messages.yml")),
    ("customdrops.yml", include_str!("../../resources/customdrops.yml")),
    ("rules.yml", include_str!("../../resources/rules.yml")),
];

/// The plugin's own default files, matching the compatible versions this
/// build expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl EmbeddedResources {
    pub fn new() -> Self {
        Self
    }
}

impl DefaultResourceProvider for EmbeddedResources {
    fn packaged_default(&self, file_name: &str) -> Result<String, ResourceError> {
        PACKAGED
            .iter()
            .find(|(name, _)| *name == file_name)
            .map(|(_, content)| (*content).to_string())
            .ok_or_else(|| ResourceError::NotPackaged(file_name.to_string()))
    }
}
