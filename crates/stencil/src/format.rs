/*
 * format.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The `format` entry points.

use crate::block::resolve_block;
use crate::error::{TemplateError, TemplateResult};
use crate::machine::{Action, Mode, step};
use crate::plugin::PluginRegistry;
use crate::scanner::split_fragments;
use crate::value::{Value, ValueSource};

/// Options for [`format_with`].
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Substituted (then stringified) when a variable is absent from the
    /// value source. When unset, absent variables render as the literal
    /// text `undefined`.
    pub missing_variable_default: Option<Value>,

    /// Plugins available to placeholder pipe chains. Empty by default; the
    /// built-in pack is opt-in via
    /// [`default_plugins`](crate::builtins::default_plugins).
    pub plugins: PluginRegistry,
}

impl FormatOptions {
    /// Create options with no default value and no plugins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the substitution for absent variables.
    pub fn with_missing_variable_default(mut self, value: impl Into<Value>) -> Self {
        self.missing_variable_default = Some(value.into());
        self
    }

    /// Set the plugin registry.
    pub fn with_plugins(mut self, plugins: PluginRegistry) -> Self {
        self.plugins = plugins;
        self
    }
}

/// Format a template with default options.
///
/// Placeholders (`{{ name }}`) are resolved against `values`, comments
/// (`{# … #}`) are stripped, and `\` escapes the following delimiter.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// let values = HashMap::from([("fruit", "pear")]);
/// assert_eq!(
///     stencil::format("I like {{ fruit }}.", &values).unwrap(),
///     "I like pear."
/// );
/// ```
pub fn format<S: ValueSource>(template: &str, values: &S) -> TemplateResult<String> {
    format_with(template, values, &FormatOptions::default())
}

/// Format a template with explicit [`FormatOptions`].
///
/// A placeholder body may pipe the value through plugins, left to right:
///
/// ```
/// use std::collections::HashMap;
/// use stencil::{FormatOptions, Plugin, PluginRegistry};
///
/// let mut plugins = PluginRegistry::new();
/// plugins.register("shout", Plugin::transform(|text: &str| text.to_uppercase()));
///
/// let values = HashMap::from([("fruit", "pear")]);
/// let options = FormatOptions::new().with_plugins(plugins);
/// assert_eq!(
///     stencil::format_with("{{ fruit | shout }}!", &values, &options).unwrap(),
///     "PEAR!"
/// );
/// ```
pub fn format_with<S: ValueSource>(
    template: &str,
    values: &S,
    options: &FormatOptions,
) -> TemplateResult<String> {
    let mut mode = Mode::Text;
    let mut output: Vec<String> = Vec::new();

    for fragment in split_fragments(template) {
        let (next, action) = step(mode, fragment)?;
        mode = next;
        match action {
            Action::Nothing => {}
            Action::Emit(text) => output.push(text.to_string()),
            Action::Resolve(body) => output.push(resolve_block(body, values, options)?),
        }
    }

    if mode != Mode::Text {
        return Err(TemplateError::UnclosedBlock);
    }

    Ok(output.concat())
}
