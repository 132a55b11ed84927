//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DomainError {
    /// Check if this error came from the YAML parser or emitter
    pub fn is_yaml(&self) -> bool {
        matches!(self, DomainError::Yaml(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_name_display() {
        let error = DomainError::InvalidFileName("../rules".to_string());
        assert_eq!(error.to_string(), "Invalid file name: ../rules");
    }

    #[test]
    fn test_is_yaml_check() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
        assert!(DomainError::Yaml(yaml_err).is_yaml());
        assert!(!DomainError::InvalidFileName(String::new()).is_yaml());
    }
}
