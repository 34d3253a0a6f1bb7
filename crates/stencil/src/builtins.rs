/*
 * builtins.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The built-in transform library.
//!
//! Pure string transforms with no knowledge of the formatter's control
//! flow. None of them are active by default; callers opt in:
//!
//! ```
//! use std::collections::HashMap;
//! use stencil::{FormatOptions, default_plugins, format_with};
//!
//! let values = HashMap::from([("name", "default plugins")]);
//! let options = FormatOptions::new().with_plugins(default_plugins());
//! assert_eq!(
//!     format_with("{{ name | uppercase | snakeCase }}!", &values, &options).unwrap(),
//!     "DEFAULT_PLUGINS!"
//! );
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::error::PluginError;
use crate::plugin::{Plugin, PluginRegistry, TransformFn};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// The built-in plugin pack, under its template-facing names.
pub fn default_plugins() -> PluginRegistry {
    let mut plugins = PluginRegistry::new();
    plugins.register("uppercase", Plugin::transform(|t: &str| t.to_uppercase()));
    plugins.register("lowercase", Plugin::transform(|t: &str| t.to_lowercase()));
    plugins.register("capitalize", Plugin::transform(capitalize));
    plugins.register("titleCase", Plugin::transform(title_case));
    plugins.register(
        "snakeCase",
        Plugin::transform(|t: &str| replace_whitespace(t, "_")),
    );
    plugins.register(
        "kebabCase",
        Plugin::transform(|t: &str| replace_whitespace(t, "-")),
    );
    plugins.register("camelCase", Plugin::transform(camel_case));
    plugins.register("pascalCase", Plugin::transform(pascal_case));
    plugins.register("trim", Plugin::transform(|t: &str| t.trim().to_string()));
    plugins.register(
        "trimStart",
        Plugin::transform(|t: &str| t.trim_start().to_string()),
    );
    plugins.register(
        "trimEnd",
        Plugin::transform(|t: &str| t.trim_end().to_string()),
    );
    plugins.register(
        "urlEscape",
        Plugin::transform(|t: &str| urlencoding::encode(t).into_owned()),
    );
    plugins.register("urlUnescape", Plugin::try_transform(url_unescape));
    plugins.register(
        "reverse",
        Plugin::transform(|t: &str| t.chars().rev().collect()),
    );
    plugins.register("escapeHtml", Plugin::transform(escape_html));
    plugins.register("unescapeHtml", Plugin::transform(unescape_html));
    plugins.register(
        "stripHtml",
        Plugin::transform(|t: &str| HTML_TAG.replace_all(t, "").into_owned()),
    );
    plugins.register("truncate", Plugin::factory(truncate));
    plugins
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn camel_case(text: &str) -> String {
    text.split_whitespace()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn pascal_case(text: &str) -> String {
    text.split_whitespace().map(capitalize).collect()
}

// Each whitespace run becomes one separator, leading and trailing runs
// included.
fn replace_whitespace(text: &str, separator: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push_str(separator);
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

fn url_unescape(text: &str) -> Result<String, PluginError> {
    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| PluginError::new(format!("invalid percent-encoding \"{}\": {}", text, err)))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_html(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

fn truncate(opts: &[String]) -> Result<TransformFn, PluginError> {
    let raw = opts
        .first()
        .ok_or_else(|| PluginError::new("truncate requires a length option"))?;
    let length: usize = raw
        .parse()
        .map_err(|_| PluginError::new(format!("truncate: invalid length \"{}\"", raw)))?;
    Ok(Arc::new(move |text: &str| {
        Ok(text.chars().take(length).collect())
    }))
}
