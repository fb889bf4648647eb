//! Sift - Hooks
//!
//! Hooks inspect and rewrite messages in-flight, one message per call.
//!
//! # Overview
//!
//! A hook receives a mutable [`Message`] and decides its fate:
//! - **Keep**: the message continues down the pipeline, possibly with a
//!   rewritten payload or new metadata
//! - **Drop**: the message leaves the pipeline; its payload is untouched
//!
//! # Architecture
//!
//! ```text
//! [Message] → [Hook 1] → [Hook 2] → ... → keep/drop
//! ```
//!
//! Hooks are chained in configuration order. The first `Drop` wins and
//! short-circuits the rest of the chain.
//!
//! # Design Principles
//!
//! - **Per-message**: a hook call owns its scratch state; nothing mutable is
//!   shared between calls, so hooks run on any number of worker tasks
//! - **Suspension-free**: hooks are CPU-bound and synchronous; the async
//!   boundary lives in the pipeline crate
//! - **Never kill the pipeline**: malformed input is logged once and dropped;
//!   only configuration errors are fatal, and only at startup
//!
//! # Adding a New Hook
//!
//! 1. Implement the [`Hook`] trait.
//! 2. Implement [`HookFactory`] for config-driven construction, interpreting
//!    the options of a `HookInstanceConfig`.
//! 3. Register the factory in [`create_default_registry`] and add the type
//!    name to `KNOWN_HOOK_TYPES` in `sift-config`.
//!
//! # Modules
//!
//! - `chain` - Sequential hook execution
//! - `registry` - Config-driven hook creation
//! - `noop` - Pass-through hook for testing
//! - `jsonexport` - JSON projection to binary COPY rows

mod chain;
mod error;
pub mod jsonexport;
pub mod noop;
pub mod registry;

pub use chain::Chain;
pub use error::HookError;
pub use jsonexport::{JsonExport, JsonExportConfig, JsonExportFactory, JsonExportMetrics, NeedleSpec};
pub use noop::NoopHook;
pub use registry::{HookFactory, HookRegistry, NoopFactory};

use sift_protocol::Message;

/// Result type for hook operations
pub type HookResult<T> = Result<T, HookError>;

/// The fate of a message after a hook ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Continue down the pipeline
    Keep,
    /// Leave the pipeline; the payload is untouched
    Drop,
}

impl Disposition {
    /// Check if the message is kept
    #[inline]
    pub fn is_keep(self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Trait for message hooks
///
/// Implementors must be `Send + Sync`; a hook is shared across worker tasks
/// and called concurrently, one message per call. All per-message state must
/// live on the call stack.
pub trait Hook: Send + Sync {
    /// Process one message
    ///
    /// On [`Disposition::Keep`] the hook may have replaced the payload and
    /// attached metadata. On [`Disposition::Drop`] the payload is exactly as
    /// it was on entry. Input errors (unparseable payloads, malformed
    /// values) are logged and reported as `Drop`, never panicked on.
    fn handle(&self, message: &mut Message) -> Disposition;

    /// Name of this hook for logging and metrics
    fn name(&self) -> &'static str;

    /// Whether this hook is currently enabled
    ///
    /// Disabled hooks are filtered out of chains at construction time.
    fn enabled(&self) -> bool {
        true
    }
}

/// Create a registry with all built-in hooks registered
///
/// Includes:
/// - `noop` - Pass-through hook
/// - `jsonexport` - JSON projection to binary COPY rows
pub fn create_default_registry() -> HookRegistry {
    let mut registry = HookRegistry::new();
    registry.register("noop", NoopFactory);
    registry.register("jsonexport", JsonExportFactory);
    registry
}
