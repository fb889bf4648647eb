//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Hook type is not known
    #[error("unknown hook type '{hook_type}', known: [{known}]")]
    UnknownHookType {
        /// The unrecognized type name
        hook_type: String,
        /// Known hook types
        known: String,
    },

    /// Required field missing
    #[error("hook '{hook_type}' is missing required field '{field}'")]
    MissingField {
        /// Hook type the field belongs to
        hook_type: String,
        /// Missing field name
        field: &'static str,
    },

    /// Invalid value
    #[error("hook '{hook_type}' has invalid {field}: {message}")]
    InvalidValue {
        /// Hook type the field belongs to
        hook_type: String,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an UnknownHookType error
    pub fn unknown_hook_type(hook_type: impl Into<String>, known: &[&str]) -> Self {
        Self::UnknownHookType {
            hook_type: hook_type.into(),
            known: known.join(", "),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(hook_type: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            hook_type: hook_type.into(),
            field,
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        hook_type: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            hook_type: hook_type.into(),
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_hook_type_error() {
        let err = ConfigError::unknown_hook_type("xmlexport", &["noop", "jsonexport"]);
        assert!(err.to_string().contains("xmlexport"));
        assert!(err.to_string().contains("noop, jsonexport"));
    }

    #[test]
    fn test_missing_field_error() {
        let err = ConfigError::missing_field("jsonexport", "jpointers");
        assert!(err.to_string().contains("jsonexport"));
        assert!(err.to_string().contains("jpointers"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("jsonexport", "jpointers", "must be a list");
        assert!(err.to_string().contains("must be a list"));
    }
}
