/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Placeholder-body parsing and resolution.
//!
//! A body is the text between `{{` and `}}`: a variable name followed by
//! zero or more pipe-separated plugin invocations, each a plugin name plus
//! whitespace-separated option tokens. Option tokens stay strings; parsing
//! them is the plugin's own responsibility.

use crate::error::{TemplateError, TemplateResult};
use crate::format::FormatOptions;
use crate::plugin::{Plugin, TransformFn};
use crate::value::ValueSource;

/// A staged pipe-chain entry.
///
/// A factory referenced without options stays un-collapsed; the failure is
/// reported only if the chain actually reaches it.
enum Stage {
    Ready(TransformFn),
    NeedsOptions(String),
}

/// Resolve a placeholder body to its substitution text.
///
/// The plugin chain is assembled and validated before the variable is
/// read, then applied strictly left to right.
pub(crate) fn resolve_block(
    body: &str,
    values: &dyn ValueSource,
    options: &FormatOptions,
) -> TemplateResult<String> {
    let body = body.trim();
    if body.is_empty() {
        return Err(TemplateError::EmptyPlaceholder);
    }

    let mut segments = body.split('|');
    let name = segments.next().unwrap_or("").trim();

    let mut stages = Vec::new();
    for segment in segments {
        let mut tokens = segment.split_whitespace();
        let plugin_name = tokens.next().unwrap_or("");
        let opts: Vec<String> = tokens.map(str::to_string).collect();

        let plugin = options
            .plugins
            .get(plugin_name)
            .ok_or_else(|| TemplateError::UnknownPlugin {
                name: plugin_name.to_string(),
            })?;

        let stage = match (plugin, opts.is_empty()) {
            (Plugin::Transform(_), false) => {
                return Err(TemplateError::UnsupportedOptions {
                    name: plugin_name.to_string(),
                });
            }
            (Plugin::Transform(transform), true) => Stage::Ready(transform.clone()),
            (Plugin::Factory(factory), false) => Stage::Ready(factory(&opts)?),
            (Plugin::Factory(_), true) => Stage::NeedsOptions(plugin_name.to_string()),
        };
        stages.push(stage);
    }

    tracing::debug!(variable = name, stages = stages.len(), "substituting placeholder");

    let value = values
        .get(name)
        .or_else(|| options.missing_variable_default.clone());
    let mut text = match value {
        Some(value) => value.to_string(),
        None => "undefined".to_string(),
    };

    for stage in &stages {
        match stage {
            Stage::Ready(transform) => text = transform(&text)?,
            Stage::NeedsOptions(plugin_name) => {
                return Err(TemplateError::MissingPluginOptions {
                    name: plugin_name.clone(),
                });
            }
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;
    use crate::plugin::PluginRegistry;
    use crate::value::Value;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn values() -> HashMap<&'static str, &'static str> {
        HashMap::from([("fruit", "cantaloupe"), ("n", "na")])
    }

    fn registry() -> PluginRegistry {
        let mut plugins = PluginRegistry::new();
        plugins.register("one", Plugin::transform(|t: &str| format!("{}1", t)));
        plugins.register("two", Plugin::transform(|t: &str| format!("{}2", t)));
        plugins.register(
            "repeat",
            Plugin::factory(|opts: &[String]| {
                let count: usize = opts[0]
                    .parse()
                    .map_err(|_| PluginError::new(format!("bad count \"{}\"", opts[0])))?;
                Ok(Arc::new(move |t: &str| Ok(t.repeat(count))) as TransformFn)
            }),
        );
        plugins
    }

    fn options() -> FormatOptions {
        FormatOptions::new().with_plugins(registry())
    }

    #[test]
    fn test_bare_variable() {
        let out = resolve_block(" fruit ", &values(), &options()).unwrap();
        assert_eq!(out, "cantaloupe");
    }

    #[test]
    fn test_variable_name_keeps_internal_whitespace() {
        let source = HashMap::from([("my var", "x")]);
        let out = resolve_block(" my var ", &source, &FormatOptions::new()).unwrap();
        assert_eq!(out, "x");
    }

    #[test]
    fn test_empty_body_fails() {
        assert!(matches!(
            resolve_block("   ", &values(), &options()),
            Err(TemplateError::EmptyPlaceholder)
        ));
    }

    #[test]
    fn test_missing_variable_yields_undefined() {
        let out = resolve_block("nope", &values(), &options()).unwrap();
        assert_eq!(out, "undefined");
    }

    #[test]
    fn test_missing_variable_uses_default() {
        let opts = options().with_missing_variable_default("any fruit");
        assert_eq!(resolve_block("nope", &values(), &opts).unwrap(), "any fruit");

        let opts = options().with_missing_variable_default(0i64);
        assert_eq!(resolve_block("nope", &values(), &opts).unwrap(), "0");
    }

    #[test]
    fn test_chain_applies_left_to_right() {
        let out = resolve_block(" fruit | one | two ", &values(), &options()).unwrap();
        assert_eq!(out, "cantaloupe12");
    }

    #[test]
    fn test_unknown_plugin_is_named() {
        match resolve_block("fruit | nope", &values(), &options()) {
            Err(TemplateError::UnknownPlugin { name }) => assert_eq!(name, "nope"),
            other => panic!("expected UnknownPlugin, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_plugin_segment_is_unknown() {
        match resolve_block("fruit | ", &values(), &options()) {
            Err(TemplateError::UnknownPlugin { name }) => assert_eq!(name, ""),
            other => panic!("expected UnknownPlugin, got {:?}", other),
        }
    }

    #[test]
    fn test_options_on_plain_transform_are_rejected() {
        match resolve_block("fruit | one 2", &values(), &options()) {
            Err(TemplateError::UnsupportedOptions { name }) => assert_eq!(name, "one"),
            other => panic!("expected UnsupportedOptions, got {:?}", other),
        }
    }

    #[test]
    fn test_factory_with_options() {
        let out = resolve_block(" n | repeat 3 ", &values(), &options()).unwrap();
        assert_eq!(out, "nanana");
    }

    #[test]
    fn test_factory_without_options_fails_when_applied() {
        match resolve_block("n | repeat", &values(), &options()) {
            Err(TemplateError::MissingPluginOptions { name }) => assert_eq!(name, "repeat"),
            other => panic!("expected MissingPluginOptions, got {:?}", other),
        }
    }

    #[test]
    fn test_factory_error_propagates_unchanged() {
        match resolve_block("n | repeat x", &values(), &options()) {
            Err(TemplateError::Plugin(err)) => {
                assert_eq!(err.to_string(), "bad count \"x\"");
            }
            other => panic!("expected the factory's own error, got {:?}", other),
        }
    }

    #[test]
    fn test_chain_validated_even_when_variable_is_absent() {
        assert!(matches!(
            resolve_block("nope | unknown", &values(), &options()),
            Err(TemplateError::UnknownPlugin { .. })
        ));
    }

    #[test]
    fn test_number_value_is_stringified_before_plugins() {
        let source = HashMap::from([("n", Value::Int(7))]);
        let out = resolve_block("n | one", &source, &options()).unwrap();
        assert_eq!(out, "71");
    }
}
