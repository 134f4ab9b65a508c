//! Configuration parsing (specter.toml)
//!
//! ```toml
//! [inspector]
//! magic_accessors = true
//!
//! [presenter]
//! max_string_width = 40
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::presenter::{Presenter, DEFAULT_MAX_STRING_WIDTH};

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Validation(String),
}

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpecterConfig {
    /// Access inspection settings
    pub inspector: InspectorConfig,

    /// Diagnostic rendering settings
    pub presenter: PresenterConfig,
}

/// Access inspection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InspectorConfig {
    /// Honor `__get`, `__set` and `__call` hooks when checking access
    pub magic_accessors: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            magic_accessors: true,
        }
    }
}

/// Diagnostic rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresenterConfig {
    /// Strings longer than this are truncated in diagnostics
    pub max_string_width: usize,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            max_string_width: DEFAULT_MAX_STRING_WIDTH,
        }
    }
}

impl SpecterConfig {
    /// Parse configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SpecterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.presenter.max_string_width == 0 {
            return Err(ConfigError::Validation(
                "presenter.max_string_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the presenter described by this configuration
    pub fn presenter(&self) -> Presenter {
        Presenter::new(self.presenter.max_string_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = SpecterConfig::from_str("").unwrap();
        assert!(config.inspector.magic_accessors);
        assert_eq!(config.presenter.max_string_width, 40);
        assert_eq!(config, SpecterConfig::default());
    }

    #[test]
    fn test_parse_all_keys() {
        let toml = r#"
[inspector]
magic_accessors = false

[presenter]
max_string_width = 12
"#;
        let config = SpecterConfig::from_str(toml).unwrap();
        assert!(!config.inspector.magic_accessors);
        assert_eq!(config.presenter.max_string_width, 12);
    }

    #[test]
    fn test_partial_section() {
        let config = SpecterConfig::from_str("[presenter]\n").unwrap();
        assert_eq!(config.presenter.max_string_width, 40);
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = SpecterConfig::from_str("[presenter]\nmax_string_width = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = SpecterConfig::from_str("[inspector]\nmagic_accessors = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[presenter]\nmax_string_width = 8").unwrap();

        let config = SpecterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.presenter.max_string_width, 8);
    }

    #[test]
    fn test_missing_file() {
        let err = SpecterConfig::from_file(Path::new("/nonexistent/specter.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
