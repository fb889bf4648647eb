//! Hook error types
//!
//! Errors that can occur while building hooks from configuration. Runtime
//! input problems are not errors at this level: hooks log them and drop the
//! message instead.

use thiserror::Error;

/// Errors that can occur while building a hook
#[derive(Debug, Error)]
pub enum HookError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Hook type not registered
    #[error("unknown hook type '{hook_type}', available: [{available}]")]
    UnknownType {
        /// The requested type name
        hook_type: String,
        /// Registered hook types
        available: String,
    },
}

impl HookError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = HookError::config("jpointer must not be empty");
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("jpointer must not be empty"));
    }

    #[test]
    fn test_unknown_type_display() {
        let err = HookError::UnknownType {
            hook_type: "xmlexport".into(),
            available: "noop, jsonexport".into(),
        };
        assert!(err.to_string().contains("xmlexport"));
        assert!(err.to_string().contains("noop, jsonexport"));
    }
}
