//! Sift Config - TOML configuration for the sift pipeline
//!
//! Loads and validates the pipeline configuration:
//! - `[log]` - logging level, format, and destination
//! - `[[hooks]]` - ordered hook instances applied to every message
//!
//! # Example
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [[hooks]]
//! type = "jsonexport"
//! jpointers = [
//!     "/event/id",
//!     ["/event/ts", "timestamp"],
//!     { jpointer = "/type", filter = "match", data = "imprint", action = "discard_false" },
//! ]
//! ```
//!
//! Hook options are kept as raw TOML values here; each hook interprets and
//! validates its own options when it is built (see the `sift-hooks` crate).

mod error;
mod hooks;
mod logging;
mod validation;

pub use error::{ConfigError, Result};
pub use hooks::{HookInstanceConfig, KNOWN_HOOK_TYPES, is_known_hook_type};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use validation::validate_config;

use serde::Deserialize;
use std::path::Path;

/// Top-level pipeline configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Ordered hook instances applied to every message
    pub hooks: Vec<HookInstanceConfig>,
}

impl Config {
    /// Parse a configuration from a TOML string and validate it
    pub fn from_str(input: &str) -> Result<Self> {
        let config: Config = toml::from_str(input)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load a configuration from a TOML file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&input)
    }
}

#[cfg(test)]
mod config_test;
