//! jsonexport configuration
//!
//! Users write `jpointers` entries in three shapes; all are normalized into
//! the same 5-tuple before compilation:
//!
//! ```toml
//! jpointers = [
//!     # bare pointer: text column, always stored
//!     "/event/id",
//!
//!     # positional: pointer, type, action, filter, filter data
//!     ["/event/ts", "timestamp", "store"],
//!
//!     # named keys
//!     { jpointer = "/type", action = "discard_false", filter = "match", data = "imprint" },
//! ]
//! ```
//!
//! Missing positions and keys take the defaults `text` / `store` / `noop` /
//! `""`. Unknown type, action, or filter names are rejected here, before any
//! message flows; `match` and `substr` refuse to run without filter data.
//! Normalization is idempotent: a normalized tuple re-normalizes to itself.

use sift_config::HookInstanceConfig;

use crate::{HookError, HookResult};

use super::needle::{Action, FilterType, PqType};

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

/// Default output type for a needle
pub const DEFAULT_PQTYPE: &str = "text";
/// Default action for a needle
pub const DEFAULT_ACTION: &str = "store";
/// Default filter for a needle
pub const DEFAULT_FILTER: &str = "noop";

/// One normalized extraction rule: the canonical 5-tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeedleSpec {
    /// RFC 6901 pointer, never empty
    pub jpointer: String,
    /// Output type name
    pub pqtype: String,
    /// Action name
    pub action: String,
    /// Filter name
    pub filter: String,
    /// Filter argument; empty unless the filter requires one
    pub data: String,
}

impl NeedleSpec {
    /// Create a spec with defaults for everything but the pointer
    pub fn new(jpointer: impl Into<String>) -> Self {
        Self {
            jpointer: jpointer.into(),
            pqtype: DEFAULT_PQTYPE.to_string(),
            action: DEFAULT_ACTION.to_string(),
            filter: DEFAULT_FILTER.to_string(),
            data: String::new(),
        }
    }

    /// Set the output type
    pub fn with_pqtype(mut self, pqtype: impl Into<String>) -> Self {
        self.pqtype = pqtype.into();
        self
    }

    /// Set the action
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Set the filter
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the filter argument
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// Render the spec back into the positional TOML shape
    ///
    /// Normalizing the result yields the spec again.
    pub fn to_value(&self) -> toml::Value {
        toml::Value::Array(vec![
            toml::Value::String(self.jpointer.clone()),
            toml::Value::String(self.pqtype.clone()),
            toml::Value::String(self.action.clone()),
            toml::Value::String(self.filter.clone()),
            toml::Value::String(self.data.clone()),
        ])
    }
}

/// Configuration for the jsonexport hook
#[derive(Debug, Clone)]
pub struct JsonExportConfig {
    /// Whether the hook is enabled
    pub enabled: bool,
    /// Normalized extraction rules, in column order
    pub needles: Vec<NeedleSpec>,
}

impl Default for JsonExportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonExportConfig {
    /// Create an enabled config with no needles
    pub fn new() -> Self {
        Self {
            enabled: true,
            needles: Vec::new(),
        }
    }

    /// Add a needle spec
    pub fn with_needle(mut self, spec: NeedleSpec) -> Self {
        self.needles.push(spec);
        self
    }

    /// Validate every spec against the known type/action/filter names
    pub fn validate(&self) -> HookResult<()> {
        if self.needles.is_empty() {
            return Err(HookError::config("jsonexport requires at least one jpointer"));
        }
        for spec in &self.needles {
            validate_spec(spec)?;
        }
        Ok(())
    }
}

impl TryFrom<&HookInstanceConfig> for JsonExportConfig {
    type Error = HookError;

    fn try_from(config: &HookInstanceConfig) -> Result<Self, Self::Error> {
        let entries = config
            .get_array("jpointers")
            .ok_or_else(|| HookError::config("jsonexport requires a jpointers list"))?;

        let mut export_config = JsonExportConfig::new();
        export_config.enabled = config.enabled;

        for entry in entries {
            export_config.needles.push(normalize_entry(entry)?);
        }

        export_config.validate()?;
        Ok(export_config)
    }
}

/// Normalize one `jpointers` entry into the canonical 5-tuple
pub fn normalize_entry(entry: &toml::Value) -> HookResult<NeedleSpec> {
    let spec = match entry {
        toml::Value::String(jpointer) => NeedleSpec::new(jpointer.clone()),
        toml::Value::Array(items) => normalize_positional(items)?,
        toml::Value::Table(table) => normalize_named(table)?,
        other => {
            return Err(HookError::config(format!(
                "jpointer entry must be a string, array or table, got {}",
                other.type_str()
            )));
        }
    };

    validate_spec(&spec)?;
    Ok(spec)
}

/// Positional shape: 1-5 strings, defaults for the missing suffix
fn normalize_positional(items: &[toml::Value]) -> HookResult<NeedleSpec> {
    if items.is_empty() || items.len() > 5 {
        return Err(HookError::config(format!(
            "jpointer array must hold 1 to 5 strings, got {}",
            items.len()
        )));
    }

    let position = |index: usize| -> HookResult<Option<&str>> {
        match items.get(index) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(HookError::config(format!(
                "jpointer array element {} must be a string, got {}",
                index,
                other.type_str()
            ))),
        }
    };

    let mut spec = NeedleSpec::new(position(0)?.unwrap_or_default());
    if let Some(pqtype) = position(1)? {
        spec.pqtype = pqtype.to_string();
    }
    if let Some(action) = position(2)? {
        spec.action = action.to_string();
    }
    if let Some(filter) = position(3)? {
        spec.filter = filter.to_string();
    }
    if let Some(data) = position(4)? {
        spec.data = data.to_string();
    }
    Ok(spec)
}

/// Named shape: table with `jpointer` plus optional policy keys
fn normalize_named(table: &toml::map::Map<String, toml::Value>) -> HookResult<NeedleSpec> {
    let key = |name: &str| -> HookResult<Option<&str>> {
        match table.get(name) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(HookError::config(format!(
                "jpointer key '{}' must be a string, got {}",
                name,
                other.type_str()
            ))),
        }
    };

    let jpointer = key("jpointer")?
        .ok_or_else(|| HookError::config("jpointer table requires a 'jpointer' key"))?;

    let mut spec = NeedleSpec::new(jpointer);
    if let Some(pqtype) = key("pqtype")? {
        spec.pqtype = pqtype.to_string();
    }
    if let Some(action) = key("action")? {
        spec.action = action.to_string();
    }
    if let Some(filter) = key("filter")? {
        spec.filter = filter.to_string();
    }
    if let Some(data) = key("data")? {
        spec.data = data.to_string();
    }
    Ok(spec)
}

/// Reject unknown enum names, empty pointers, and missing filter data
fn validate_spec(spec: &NeedleSpec) -> HookResult<()> {
    if spec.jpointer.is_empty() {
        return Err(HookError::config("jpointer must not be empty"));
    }

    if PqType::from_name(&spec.pqtype).is_none() {
        return Err(HookError::config(format!(
            "not a valid type transformation: {}",
            spec.pqtype
        )));
    }

    if Action::from_name(&spec.action).is_none() {
        return Err(HookError::config(format!(
            "not a valid action type: {}",
            spec.action
        )));
    }

    let filter = FilterType::from_name(&spec.filter)
        .ok_or_else(|| HookError::config(format!("not a valid filter type: {}", spec.filter)))?;

    if filter.needs_data() && spec.data.is_empty() {
        return Err(HookError::config(format!(
            "filter '{}' needs configuration data",
            filter.name()
        )));
    }

    Ok(())
}
