//! Error types for weft core operations.

use thiserror::Error;

/// Error type for loading and validating generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error while reading a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML document.
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A setting holds a value the generator cannot work with.
    #[error("invalid setting '{setting}': {message}")]
    Invalid {
        /// Setting name.
        setting: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid-setting error.
    pub fn invalid(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            setting: setting.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for weft core operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
