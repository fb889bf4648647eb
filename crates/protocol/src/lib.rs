//! Sift Protocol - Core message types for the sift pipeline
//!
//! This crate provides the foundational types that flow through the pipeline:
//! - `Message` - One payload in flight, plus its metadata map
//! - `Metadata` / `MDatum` - Typed side-channel data attached by hooks
//! - `ProtocolError` - Invariant violations when constructing the above
//!
//! # Design Principles
//!
//! - **Cheap to hand around**: the payload is a `bytes::Bytes`, so cloning a
//!   `Message` does not copy the payload
//! - **Explicit ownership**: replacing the payload drops the prior buffer;
//!   there is no aliasing between pipeline stages
//! - **Terminator contract**: payloads produced by consumers carry a zero
//!   byte at offset `len`. Hooks that parse the payload verify this before
//!   touching it; see [`Message::is_terminated`].

mod error;
mod message;
mod metadata;

pub use error::ProtocolError;
pub use message::Message;
pub use metadata::{MDatum, Metadata};

// Re-export bytes for convenience
pub use bytes::Bytes;

// Test modules - only compiled during testing
#[cfg(test)]
mod message_test;
#[cfg(test)]
mod metadata_test;
