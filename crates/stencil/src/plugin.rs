/*
 * plugin.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The plugin protocol: named text transforms invocable in placeholder
//! pipe chains.
//!
//! A plugin is either a plain transform (`{{ name | uppercase }}`) or a
//! higher-order transform that first consumes option tokens and returns the
//! transform to run (`{{ name | truncate 10 }}`). The two shapes are
//! distinct variants; the formatter dispatches on the tag rather than
//! probing what a call returned.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::PluginError;

/// A text transform: consumes the accumulated string, produces the next one.
pub type TransformFn = Arc<dyn Fn(&str) -> Result<String, PluginError> + Send + Sync>;

/// A transform factory: consumes option tokens, produces a transform.
pub type FactoryFn = Arc<dyn Fn(&[String]) -> Result<TransformFn, PluginError> + Send + Sync>;

/// A named text transform, in one of its two shapes.
#[derive(Clone)]
pub enum Plugin {
    /// A direct transform.
    Transform(TransformFn),

    /// A higher-order transform: options in, transform out.
    Factory(FactoryFn),
}

impl Plugin {
    /// Create a plugin from an infallible string transform.
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Plugin::Transform(Arc::new(move |text| Ok(f(text))))
    }

    /// Create a plugin from a fallible string transform.
    pub fn try_transform<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<String, PluginError> + Send + Sync + 'static,
    {
        Plugin::Transform(Arc::new(f))
    }

    /// Create a higher-order plugin from a transform factory.
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> Result<TransformFn, PluginError> + Send + Sync + 'static,
    {
        Plugin::Factory(Arc::new(f))
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plugin::Transform(_) => f.write_str("Plugin::Transform(..)"),
            Plugin::Factory(_) => f.write_str("Plugin::Factory(..)"),
        }
    }
}

/// A registry of plugins available to placeholder pipe chains.
///
/// The registry passed in
/// [`FormatOptions`](crate::format::FormatOptions) is empty by default;
/// the built-in pack is opt-in via
/// [`default_plugins`](crate::builtins::default_plugins).
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Plugin>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under the given template-facing name.
    ///
    /// Registering an existing name replaces the previous plugin.
    pub fn register(&mut self, name: impl Into<String>, plugin: Plugin) -> &mut Self {
        self.plugins.insert(name.into(), plugin);
        self
    }

    /// Look up a plugin by name.
    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.plugins.get(name)
    }

    /// Merge another registry into this one; its entries win on collisions.
    pub fn extend(&mut self, other: PluginRegistry) {
        self.plugins.extend(other.plugins);
    }

    /// The registered plugin names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Whether the registry has no plugins.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.plugins.iter()).finish()
    }
}
