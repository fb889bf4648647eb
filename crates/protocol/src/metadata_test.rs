//! Tests for Metadata

use crate::{MDatum, Metadata};

#[test]
fn test_empty() {
    let md = Metadata::new();
    assert!(md.is_empty());
    assert_eq!(md.len(), 0);
    assert!(md.get("jpointer").is_none());
}

#[test]
fn test_insert_and_get() {
    let mut md = Metadata::new();
    md.insert("jpointer", MDatum::string("value"));

    assert_eq!(md.len(), 1);
    assert!(md.contains("jpointer"));
    assert_eq!(md.get("jpointer"), Some(&MDatum::String("value".into())));
}

#[test]
fn test_last_writer_wins() {
    let mut md = Metadata::new();

    assert!(md.insert("jpointer", MDatum::string("first")).is_none());
    let prior = md.insert("jpointer", MDatum::string("second"));

    assert_eq!(prior, Some(MDatum::String("first".into())));
    assert_eq!(md.len(), 1);
    assert_eq!(md.get("jpointer").and_then(|d| d.as_str()), Some("second"));
}

#[test]
fn test_iter() {
    let mut md = Metadata::new();
    md.insert("a", MDatum::string("1"));
    md.insert("b", MDatum::string("2"));

    let mut keys: Vec<_> = md.iter().map(|(k, _)| k.to_string()).collect();
    keys.sort();
    assert_eq!(keys, ["a", "b"]);
}
