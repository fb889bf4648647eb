//! Tests for top-level Config loading

use crate::{Config, LogLevel};

#[test]
fn test_from_str_empty() {
    let config = Config::from_str("").unwrap();
    assert!(config.hooks.is_empty());
    assert_eq!(config.log.level, LogLevel::Info);
}

#[test]
fn test_from_str_full() {
    let config = Config::from_str(
        r#"
[log]
level = "debug"

[[hooks]]
type = "noop"

[[hooks]]
type = "jsonexport"
jpointers = ["/a"]
"#,
    )
    .unwrap();

    assert_eq!(config.log.level, LogLevel::Debug);
    assert_eq!(config.hooks.len(), 2);
    assert_eq!(config.hooks[0].hook_type, "noop");
    assert_eq!(config.hooks[1].hook_type, "jsonexport");
}

#[test]
fn test_from_str_validates() {
    // well-formed TOML, invalid configuration
    let err = Config::from_str(
        r#"
[[hooks]]
type = "jsonexport"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("jpointers"));
}

#[test]
fn test_from_str_parse_error() {
    let err = Config::from_str("hooks = 3").unwrap_err();
    assert!(err.to_string().contains("parse"));
}

#[test]
fn test_from_file_missing() {
    let err = Config::from_file("/nonexistent/sift.toml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/sift.toml"));
}
