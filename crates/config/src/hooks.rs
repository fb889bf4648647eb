//! Hook configuration
//!
//! Defines hook instances applied to messages flowing through the pipeline.
//! Each hook has a type and type-specific configuration.
//!
//! # Example
//!
//! ```toml
//! [[hooks]]
//! type = "jsonexport"
//! jpointers = ["/event/id", ["/event/ts", "timestamp"]]
//!
//! [[hooks]]
//! type = "noop"
//! ```

use serde::Deserialize;
use std::collections::HashMap;

/// Configuration for a single hook instance
///
/// Each hook has a type that determines its behavior, plus type-specific
/// configuration options. Options are kept as raw TOML values and
/// interpreted by the hook when it is built.
#[derive(Debug, Clone, Deserialize)]
pub struct HookInstanceConfig {
    /// Hook type (e.g., "noop", "jsonexport")
    #[serde(rename = "type")]
    pub hook_type: String,

    /// Whether this hook is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Type-specific configuration options
    /// These are passed to the hook factory
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

fn default_true() -> bool {
    true
}

impl HookInstanceConfig {
    /// Create a new noop hook config
    pub fn noop() -> Self {
        Self {
            hook_type: "noop".to_string(),
            enabled: true,
            options: HashMap::new(),
        }
    }

    /// Create a new jsonexport hook config with no jpointers
    pub fn jsonexport() -> Self {
        Self {
            hook_type: "jsonexport".to_string(),
            enabled: true,
            options: HashMap::new(),
        }
    }

    /// Get an option as bool
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.options.get(key).and_then(|v| v.as_bool())
    }

    /// Get an option as i64
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.options.get(key).and_then(|v| v.as_integer())
    }

    /// Get an option as string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }

    /// Get an option as a raw array of values
    pub fn get_array(&self, key: &str) -> Option<&[toml::Value]> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
    }
}

/// Known hook types for validation
pub const KNOWN_HOOK_TYPES: &[&str] = &["noop", "jsonexport"];

/// Check if a hook type is known
pub fn is_known_hook_type(hook_type: &str) -> bool {
    KNOWN_HOOK_TYPES.contains(&hook_type)
}
