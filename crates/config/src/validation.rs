//! Configuration validation
//!
//! Shape-level checks performed before any hook is built:
//! - Hook types are known
//! - `jsonexport` hooks carry a `jpointers` list
//!
//! Hooks validate the contents of their own options when they are built;
//! this module only rejects configurations no hook could accept.

use crate::error::{ConfigError, Result};
use crate::hooks::{KNOWN_HOOK_TYPES, is_known_hook_type};
use crate::Config;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    for hook in &config.hooks {
        if !is_known_hook_type(&hook.hook_type) {
            return Err(ConfigError::unknown_hook_type(
                &hook.hook_type,
                KNOWN_HOOK_TYPES,
            ));
        }

        if hook.hook_type == "jsonexport" {
            validate_jsonexport(hook)?;
        }
    }

    Ok(())
}

/// Validate the shape of a jsonexport hook configuration
fn validate_jsonexport(hook: &crate::HookInstanceConfig) -> Result<()> {
    let Some(jpointers) = hook.options.get("jpointers") else {
        return Err(ConfigError::missing_field(&hook.hook_type, "jpointers"));
    };

    let Some(entries) = jpointers.as_array() else {
        return Err(ConfigError::invalid_value(
            &hook.hook_type,
            "jpointers",
            "must be a list",
        ));
    };

    if entries.is_empty() {
        return Err(ConfigError::invalid_value(
            &hook.hook_type,
            "jpointers",
            "must not be empty",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Config {
        toml::from_str(input).unwrap()
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = parse("");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_hook_type_rejected() {
        let config = parse(
            r#"
[[hooks]]
type = "xmlexport"
"#,
        );
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("xmlexport"));
    }

    #[test]
    fn test_jsonexport_requires_jpointers() {
        let config = parse(
            r#"
[[hooks]]
type = "jsonexport"
"#,
        );
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("jpointers"));
    }

    #[test]
    fn test_jsonexport_rejects_non_list() {
        let config = parse(
            r#"
[[hooks]]
type = "jsonexport"
jpointers = "/a"
"#,
        );
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("must be a list"));
    }

    #[test]
    fn test_jsonexport_rejects_empty_list() {
        let config = parse(
            r#"
[[hooks]]
type = "jsonexport"
jpointers = []
"#,
        );
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_valid_jsonexport() {
        let config = parse(
            r#"
[[hooks]]
type = "jsonexport"
jpointers = ["/a", ["/b", "timestamp"]]
"#,
        );
        assert!(validate_config(&config).is_ok());
    }
}
