//! Message - One payload in flight
//!
//! A `Message` owns a payload buffer, its logical length, and a metadata
//! map. Consumers create messages from raw input; hooks may replace the
//! payload wholesale (dropping the prior buffer) and attach metadata for
//! stages further down the pipeline.
//!
//! # Terminator contract
//!
//! Payloads built with [`Message::new`] carry one extra zero byte after the
//! logical payload, i.e. `data()[len()] == 0`. Text-parsing hooks rely on
//! this and check it via [`Message::is_terminated`] before reading. Payloads
//! installed with [`Message::set_payload`] (typically encoded binary rows)
//! do not carry a terminator; their logical length is the buffer length.

use bytes::Bytes;

use crate::error::ProtocolError;
use crate::metadata::Metadata;

/// One payload flowing through the pipeline
///
/// # Design
///
/// - `data` is a `bytes::Bytes`, so clones share the buffer
/// - `len` is the logical payload length; `data` may hold one extra
///   terminator byte beyond it
/// - `metadata` is a typed map hooks use to talk to each other
#[derive(Debug, Clone)]
pub struct Message {
    /// Payload buffer, possibly with a trailing terminator byte
    data: Bytes,

    /// Logical payload length (terminator excluded)
    len: usize,

    /// Side-channel data attached by hooks
    metadata: Metadata,
}

impl Message {
    /// Create a message from an ingested payload
    ///
    /// Appends the zero terminator required by text-parsing hooks; the
    /// logical length is the payload length without it.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        let mut buf = payload.into();
        let len = buf.len();
        buf.push(0);

        Self {
            data: Bytes::from(buf),
            len,
            metadata: Metadata::new(),
        }
    }

    /// Create a message from a raw buffer and an explicit logical length
    ///
    /// No terminator is appended; this exists for consumers that manage
    /// their own buffers. The length may equal the buffer length (an
    /// unterminated payload) but never exceed it.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::LengthOutOfBounds`] if `len` points past the buffer.
    pub fn from_raw(data: impl Into<Bytes>, len: usize) -> Result<Self, ProtocolError> {
        let data = data.into();
        if len > data.len() {
            return Err(ProtocolError::length_out_of_bounds(len, data.len()));
        }

        Ok(Self {
            data,
            len,
            metadata: Metadata::new(),
        })
    }

    /// Get the full backing buffer, terminator included if present
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the logical payload (terminator excluded)
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Get the logical payload length
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the payload is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check the terminator contract: a zero byte at offset `len`
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.data.get(self.len) == Some(&0)
    }

    /// Replace the payload with a new buffer
    ///
    /// The prior buffer is dropped. The new payload carries no terminator;
    /// its logical length is the buffer length.
    pub fn set_payload(&mut self, payload: impl Into<Bytes>) {
        let data = payload.into();
        self.len = data.len();
        self.data = data;
    }

    /// Get the metadata map
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get the metadata map mutably
    #[inline]
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
