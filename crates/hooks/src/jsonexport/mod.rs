//! jsonexport Hook - JSON projection to binary COPY rows
//!
//! Projects each JSON payload through a set of configured extraction rules
//! ("needles") and replaces the payload with one length-prefixed binary row
//! in the layout the downstream store's binary COPY protocol expects.
//!
//! # Job To Be Done
//!
//! Turn arbitrary JSON documents into fixed-column rows for bulk ingestion
//! into a relational store, deciding per message whether it belongs in the
//! store at all.
//!
//! # Configuration
//!
//! | Option | Type | Description |
//! |--------|------|-------------|
//! | `jpointers` | array | Extraction rules; see below |
//!
//! Each `jpointers` entry is a bare pointer string, a positional array
//! `[jpointer, pqtype, action, filter, data]`, or a table with those keys.
//!
//! ## Types
//!
//! | Name | Output |
//! |------|--------|
//! | `text` | String rendering of the located value, raw bytes |
//! | `timestamp` | ISO-8601 UTC instant as 8-byte big-endian microseconds since 2000-01-01 |
//!
//! ## Actions
//!
//! | Name | Keeps the message? | Stores a column? |
//! |------|--------------------|------------------|
//! | `store` | always | yes |
//! | `store_true` | iff filter matched | yes |
//! | `discard_false` | iff filter matched | no |
//! | `discard_true` | iff filter did not match | no |
//! | `store_meta` | always | yes, and publishes metadata |
//!
//! ## Filters
//!
//! | Name | True when |
//! |------|-----------|
//! | `noop` | always |
//! | `match` | located value renders byte-equal to `data` |
//! | `substr` | `data` occurs in the rendering |
//! | `exists` | the pointer resolved |
//!
//! # Row format
//!
//! Network byte order throughout:
//!
//! ```text
//! uint16  fields_count              // fixed at configuration time
//! repeat, per storing needle in configuration order:
//!     uint32  length                // 0xFFFFFFFF means NULL, no bytes follow
//!     byte[length] payload
//! ```
//!
//! Unresolved pointers store the NULL sentinel. The header count never
//! varies per message.
//!
//! # TOML Example
//!
//! ```toml
//! [[hooks]]
//! type = "jsonexport"
//! jpointers = [
//!     { jpointer = "/type", filter = "match", data = "imprint", action = "discard_false" },
//!     "/event/id",
//!     ["/event/ts", "timestamp"],
//! ]
//! ```

mod config;
mod needle;
mod timestamp;

pub use config::{JsonExportConfig, NeedleSpec, normalize_entry};
pub use needle::{Action, FilterType, Needle, NeedleSet, PqType};
pub use timestamp::TimestampError;

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use sift_config::HookInstanceConfig;
use sift_protocol::{MDatum, Message, Metadata};

use crate::registry::HookFactory;
use crate::{Disposition, Hook, HookResult};

use needle::render_text;
use timestamp::encode_timestamp;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Field length marking a NULL column, the downstream store's convention
pub const NULL_SENTINEL: u32 = 0xFFFF_FFFF;

/// Metadata key under which `store_meta` publishes values
pub const METADATA_KEY: &str = "jpointer";

/// Metrics for the jsonexport hook
#[derive(Debug, Default)]
pub struct JsonExportMetrics {
    /// Messages received
    pub messages_received: AtomicU64,
    /// Messages kept, payload replaced by a row
    pub messages_kept: AtomicU64,
    /// Messages dropped by a filter/action decision
    pub messages_filtered: AtomicU64,
    /// Messages dropped for contract, parse, or format failures
    pub messages_failed: AtomicU64,
}

impl JsonExportMetrics {
    /// Get drop rate (0.0 - 1.0), decisions and failures combined
    pub fn drop_rate(&self) -> f64 {
        let received = self.messages_received.load(Ordering::Relaxed);
        if received == 0 {
            return 0.0;
        }
        let dropped = self.messages_filtered.load(Ordering::Relaxed)
            + self.messages_failed.load(Ordering::Relaxed);
        dropped as f64 / received as f64
    }
}

/// One evaluated field, scratch state for a single message
///
/// Text fields borrow from the parsed document, so a slot never outlives
/// the `serde_json::Value` it was evaluated against; timestamp fields own
/// their 8 bytes inline.
struct Slot<'doc> {
    value: FieldValue<'doc>,
    /// Publish this slot's payload as message metadata
    meta: bool,
}

enum FieldValue<'doc> {
    /// Pointer did not resolve
    Null,
    /// String rendering, borrowed from the document where possible
    Text(Cow<'doc, str>),
    /// Encoded big-endian microsecond epoch
    Timestamp([u8; 8]),
}

impl FieldValue<'_> {
    fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Null => None,
            Self::Text(text) => Some(text.as_bytes()),
            Self::Timestamp(bytes) => Some(bytes),
        }
    }
}

/// Outcome of walking the needle set over one document
enum Projection<'doc> {
    /// All needles evaluated; ready to serialize
    Row(Vec<Slot<'doc>>),
    /// A filter/action decision discarded the message (not an error)
    Discard,
    /// A formatter rejected a located value (already logged)
    Failed,
}

/// The jsonexport hook
///
/// The compiled needle set is immutable and shared across worker tasks;
/// each `handle` call keeps its scratch state (parsed document, slots, row
/// buffer) on its own stack.
pub struct JsonExport {
    needles: NeedleSet,
    enabled: bool,
    metrics: JsonExportMetrics,
}

impl JsonExport {
    /// Create a jsonexport hook from a validated configuration
    pub fn new(config: JsonExportConfig) -> HookResult<Self> {
        config.validate()?;
        let needles = NeedleSet::compile(&config.needles)?;

        Ok(Self {
            needles,
            enabled: config.enabled,
            metrics: JsonExportMetrics::default(),
        })
    }

    /// Get hook metrics
    pub fn metrics(&self) -> &JsonExportMetrics {
        &self.metrics
    }

    /// Get the compiled needle set
    pub fn needles(&self) -> &NeedleSet {
        &self.needles
    }

    /// Walk the needle set over a parsed document
    ///
    /// Needles run in configuration order: resolve the pointer, apply the
    /// filter, let the action decide the message's fate, then format the
    /// located value into its slot. Unresolved pointers produce NULL slots.
    fn evaluate<'doc>(&self, doc: &'doc Value) -> Projection<'doc> {
        let mut slots = Vec::with_capacity(self.needles.len());

        for needle in self.needles.iter() {
            let found = doc.pointer(needle.pointer());

            let filter_result = needle.filter(found);
            if !needle.action().keep(filter_result) {
                return Projection::Discard;
            }

            let slot = match found {
                None => Slot {
                    value: FieldValue::Null,
                    meta: false,
                },
                Some(value) => {
                    let formatted = match self.format_value(needle, value) {
                        Ok(formatted) => formatted,
                        Err(error) => {
                            tracing::warn!(
                                pointer = needle.pointer(),
                                value = %render_text(value),
                                %error,
                                "failed to format field"
                            );
                            return Projection::Failed;
                        }
                    };
                    Slot {
                        value: formatted,
                        // a located null is not metadata
                        meta: needle.action() == Action::StoreMeta && !value.is_null(),
                    }
                }
            };

            slots.push(slot);
        }

        Projection::Row(slots)
    }

    /// Format a located value according to the needle's output type
    fn format_value<'doc>(
        &self,
        needle: &Needle,
        value: &'doc Value,
    ) -> Result<FieldValue<'doc>, TimestampError> {
        match needle.pqtype() {
            PqType::Text => Ok(FieldValue::Text(render_text(value))),
            PqType::Timestamp => encode_timestamp(&render_text(value)).map(FieldValue::Timestamp),
        }
    }

    /// Serialize the evaluated slots into one binary row
    ///
    /// The header count is the compile-time `fields_count`; needles whose
    /// action does not store never contribute, whatever their slot holds.
    fn serialize_row(&self, slots: &[Slot<'_>]) -> Vec<u8> {
        let mut capacity = 2;
        for (needle, slot) in self.needles.iter().zip(slots) {
            if needle.action().stores() {
                capacity += 4 + slot.value.payload().map_or(0, <[u8]>::len);
            }
        }

        let mut row = Vec::with_capacity(capacity);
        row.extend_from_slice(&self.needles.fields_count().to_be_bytes());

        for (needle, slot) in self.needles.iter().zip(slots) {
            if !needle.action().stores() {
                continue;
            }
            match slot.value.payload() {
                None => row.extend_from_slice(&NULL_SENTINEL.to_be_bytes()),
                Some(payload) => {
                    row.extend_from_slice(&(payload.len() as u32).to_be_bytes());
                    row.extend_from_slice(payload);
                }
            }
        }

        row
    }

    /// Publish marked slots into the message metadata map
    ///
    /// All `store_meta` needles share one key; the last one in configuration
    /// order wins.
    fn publish_metadata(&self, slots: &[Slot<'_>], metadata: &mut Metadata) {
        for slot in slots {
            if !slot.meta {
                continue;
            }
            if let Some(payload) = slot.value.payload() {
                metadata.insert(
                    METADATA_KEY,
                    MDatum::String(String::from_utf8_lossy(payload).into_owned()),
                );
            }
        }
    }
}

impl Hook for JsonExport {
    fn handle(&self, message: &mut Message) -> Disposition {
        self.metrics.messages_received.fetch_add(1, Ordering::Relaxed);

        // producer contract: payloads end on a zero terminator
        if !message.is_terminated() {
            tracing::warn!(len = message.len(), "payload does not end on a zero terminator");
            self.metrics.messages_failed.fetch_add(1, Ordering::Relaxed);
            return Disposition::Drop;
        }

        let doc: Value = match serde_json::from_slice(message.payload()) {
            Ok(doc) => doc,
            Err(error) => {
                tracing::warn!(%error, "failed to parse message payload as JSON");
                self.metrics.messages_failed.fetch_add(1, Ordering::Relaxed);
                return Disposition::Drop;
            }
        };

        match self.evaluate(&doc) {
            Projection::Row(slots) => {
                let row = self.serialize_row(&slots);
                self.publish_metadata(&slots, message.metadata_mut());
                message.set_payload(row);
                self.metrics.messages_kept.fetch_add(1, Ordering::Relaxed);
                Disposition::Keep
            }
            // a decision, not an error: drop silently
            Projection::Discard => {
                self.metrics.messages_filtered.fetch_add(1, Ordering::Relaxed);
                Disposition::Drop
            }
            Projection::Failed => {
                self.metrics.messages_failed.fetch_add(1, Ordering::Relaxed);
                Disposition::Drop
            }
        }
    }

    fn name(&self) -> &'static str {
        "jsonexport"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

impl std::fmt::Debug for JsonExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonExport")
            .field("needles", &self.needles.len())
            .field("fields", &self.needles.fields_count())
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Factory for creating jsonexport hooks
#[derive(Debug, Clone, Copy)]
pub struct JsonExportFactory;

impl HookFactory for JsonExportFactory {
    fn create(&self, config: &HookInstanceConfig) -> HookResult<Box<dyn Hook>> {
        let export_config = JsonExportConfig::try_from(config)?;
        Ok(Box::new(JsonExport::new(export_config)?))
    }

    fn name(&self) -> &'static str {
        "jsonexport"
    }
}
