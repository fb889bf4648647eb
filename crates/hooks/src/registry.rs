//! Hook Registry - Config-driven hook creation
//!
//! The registry maps hook type names to factories, so the set of hooks a
//! pipeline runs is decided by its configuration file, not by code.
//!
//! # Example
//!
//! ```ignore
//! let registry = create_default_registry();
//! let hook = registry.create(&hook_instance_config)?;
//! ```

use std::collections::HashMap;

use sift_config::HookInstanceConfig;

use crate::{Hook, HookError, HookResult};

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;

/// Factory trait for creating hooks
///
/// Implement this trait to register custom hooks with the registry. The
/// factory interprets the instance options and fails with
/// [`HookError::Config`] when they are invalid.
pub trait HookFactory: Send + Sync {
    /// Create a hook instance from configuration
    fn create(&self, config: &HookInstanceConfig) -> HookResult<Box<dyn Hook>>;

    /// Human-readable name for this factory (for error messages)
    fn name(&self) -> &'static str;
}

/// Registry for hook factories
///
/// Maps hook type names (e.g., "noop", "jsonexport") to their factory
/// implementations.
pub struct HookRegistry {
    factories: HashMap<String, Box<dyn HookFactory>>,
}

impl HookRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a hook factory
    ///
    /// # Panics
    ///
    /// Panics if a factory is already registered with this name; the set of
    /// factories is assembled once at startup.
    pub fn register<F: HookFactory + 'static>(&mut self, type_name: &str, factory: F) {
        if self.factories.contains_key(type_name) {
            panic!("hook factory '{}' already registered", type_name);
        }
        self.factories
            .insert(type_name.to_string(), Box::new(factory));
    }

    /// Create a hook from its instance configuration
    ///
    /// # Errors
    ///
    /// - [`HookError::UnknownType`] if the type is not registered
    /// - [`HookError::Config`] if the factory rejects the options
    pub fn create(&self, config: &HookInstanceConfig) -> HookResult<Box<dyn Hook>> {
        let factory =
            self.factories
                .get(&config.hook_type)
                .ok_or_else(|| HookError::UnknownType {
                    hook_type: config.hook_type.clone(),
                    available: self.available_types().join(", "),
                })?;

        factory.create(config)
    }

    /// Check if a hook type is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Get list of registered hook types
    pub fn available_types(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory for [`NoopHook`](crate::NoopHook)
///
/// This is built-in and always available.
#[derive(Debug, Clone, Copy)]
pub struct NoopFactory;

impl HookFactory for NoopFactory {
    fn create(&self, _config: &HookInstanceConfig) -> HookResult<Box<dyn Hook>> {
        Ok(Box::new(crate::noop::NoopHook::new()))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
