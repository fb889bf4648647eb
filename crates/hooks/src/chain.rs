//! Hook Chain - Sequential message processing
//!
//! The `Chain` applies multiple hooks in order to each message.
//!
//! # Design
//!
//! - **Zero-cost when empty**: an empty chain is a no-op
//! - **First drop wins**: a `Drop` from any hook short-circuits the rest
//! - **Order is configuration order**: hooks see each other's rewrites

use sift_protocol::Message;

use crate::{Disposition, Hook};

#[cfg(test)]
#[path = "chain_test.rs"]
mod tests;

/// Chain of hooks applied sequentially
pub struct Chain {
    /// Ordered list of hooks
    hooks: Vec<Box<dyn Hook>>,

    /// Whether any hooks are active
    enabled: bool,
}

impl Chain {
    /// Create a new hook chain
    ///
    /// Only enabled hooks are included. If all hooks are disabled, the
    /// chain is a no-op that keeps every message.
    pub fn new(hooks: Vec<Box<dyn Hook>>) -> Self {
        let active: Vec<_> = hooks.into_iter().filter(|h| h.enabled()).collect();
        let enabled = !active.is_empty();

        Self {
            hooks: active,
            enabled,
        }
    }

    /// Create an empty chain (no-op)
    pub fn empty() -> Self {
        Self {
            hooks: Vec::new(),
            enabled: false,
        }
    }

    /// Check if the chain has any active hooks
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the number of active hooks
    #[inline]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if the chain is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Get the names of all active hooks
    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Run a message through all hooks in order
    ///
    /// Returns [`Disposition::Drop`] as soon as any hook drops; later hooks
    /// never see the message. A dropped message's payload is exactly what
    /// the dropping hook saw on entry.
    pub fn handle(&self, message: &mut Message) -> Disposition {
        // Fast path: no hooks enabled
        if !self.enabled {
            return Disposition::Keep;
        }

        for hook in &self.hooks {
            if hook.handle(message) == Disposition::Drop {
                return Disposition::Drop;
            }
        }

        Disposition::Keep
    }

    /// Get a hook by name
    ///
    /// Useful for reading a specific hook's metrics.
    pub fn get(&self, name: &str) -> Option<&dyn Hook> {
        self.hooks
            .iter()
            .find(|h| h.name() == name)
            .map(|h| h.as_ref())
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::empty()
    }
}
