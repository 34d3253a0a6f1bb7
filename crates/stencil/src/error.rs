/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template formatting.

use thiserror::Error;

/// Errors that can occur while formatting a template.
///
/// Every error aborts the whole `format` call; there is no partial output.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Malformed delimiter usage: unmatched or nested blocks, escapes in
    /// positions where escaping is not permitted.
    #[error("invalid template: {message}")]
    Structural { message: String },

    /// A `{{ }}` block with no content after trimming.
    #[error("invalid template: encountered empty {{{{ }}}} block")]
    EmptyPlaceholder,

    /// A placeholder referenced a plugin that is not in the registry.
    #[error("invalid template: unknown plugin \"{name}\"")]
    UnknownPlugin { name: String },

    /// Options were supplied to a plugin that is a plain transform.
    #[error("invalid template: plugin \"{name}\" does not accept options")]
    UnsupportedOptions { name: String },

    /// A higher-order plugin was referenced without options, so it never
    /// collapsed to a transform before its output was needed.
    #[error("invalid template: plugin \"{name}\" requires options, but none were given")]
    MissingPluginOptions { name: String },

    /// Input ended with an open placeholder, comment, or escape.
    #[error("invalid template: unclosed comment or block")]
    UnclosedBlock,

    /// A plugin failed while transforming text. The plugin's message is
    /// surfaced unchanged.
    #[error(transparent)]
    Plugin(#[from] PluginError),
}

impl TemplateError {
    pub(crate) fn structural(message: impl Into<String>) -> Self {
        TemplateError::Structural {
            message: message.into(),
        }
    }
}

/// The error type plugins return from their transforms.
///
/// Carries only a message; `format` forwards it to the caller verbatim.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PluginError(String);

impl PluginError {
    /// Create a plugin error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        PluginError(message.into())
    }
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
