//! Tests for Message

use crate::{MDatum, Message, ProtocolError};

#[test]
fn test_new_appends_terminator() {
    let msg = Message::new(b"{\"a\":1}".as_slice());

    assert_eq!(msg.len(), 7);
    assert_eq!(msg.payload(), b"{\"a\":1}");
    assert_eq!(msg.data().len(), 8);
    assert_eq!(msg.data()[7], 0);
    assert!(msg.is_terminated());
}

#[test]
fn test_empty_payload() {
    let msg = Message::new(Vec::new());

    assert!(msg.is_empty());
    assert_eq!(msg.len(), 0);
    assert!(msg.is_terminated());
}

#[test]
fn test_from_raw_unterminated() {
    let msg = Message::from_raw(b"abc".as_slice(), 3).unwrap();

    assert_eq!(msg.payload(), b"abc");
    assert!(!msg.is_terminated());
}

#[test]
fn test_from_raw_wrong_terminator() {
    // data[len] exists but is not zero
    let msg = Message::from_raw(b"abcX".as_slice(), 3).unwrap();
    assert!(!msg.is_terminated());

    let msg = Message::from_raw(b"abc\0".as_slice(), 3).unwrap();
    assert!(msg.is_terminated());
}

#[test]
fn test_from_raw_rejects_length_past_buffer() {
    let err = Message::from_raw(b"abc".as_slice(), 4).unwrap_err();

    assert!(matches!(
        err,
        ProtocolError::LengthOutOfBounds { len: 4, capacity: 3 }
    ));
}

#[test]
fn test_set_payload_replaces_buffer() {
    let mut msg = Message::new(b"{}".as_slice());
    msg.set_payload(vec![0x00, 0x01, 0xff]);

    assert_eq!(msg.len(), 3);
    assert_eq!(msg.payload(), &[0x00, 0x01, 0xff]);
    assert_eq!(msg.data().len(), 3);
    // binary rows carry no terminator
    assert!(!msg.is_terminated());
}

#[test]
fn test_set_payload_keeps_metadata() {
    let mut msg = Message::new(b"{}".as_slice());
    msg.metadata_mut().insert("jpointer", MDatum::string("x"));

    msg.set_payload(vec![1, 2, 3]);

    assert_eq!(
        msg.metadata().get("jpointer").and_then(|d| d.as_str()),
        Some("x")
    );
}

#[test]
fn test_clone_shares_payload() {
    let msg = Message::new(b"shared".as_slice());
    let other = msg.clone();

    assert_eq!(msg.payload(), other.payload());
    // Bytes clones share the backing buffer
    assert_eq!(msg.data().as_ptr(), other.data().as_ptr());
}
