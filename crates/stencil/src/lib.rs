/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Minimal single-pass text-substitution engine.
//!
//! Templates are plain strings with three constructs:
//!
//! - Placeholders: `{{ name }}`, optionally piped through plugins with
//!   inline options: `{{ name | uppercase | truncate 10 }}`
//! - Comments: `{# stripped from the output #}` (placeholder syntax inside
//!   a comment is inert)
//! - Escapes: `\{{` emits the delimiter literally
//!
//! Formatting is one pass over the template: a scanner splits it at
//! delimiter boundaries and an explicit finite state machine walks the
//! fragments left to right, emitting literal text immediately and
//! resolving each placeholder against a caller-supplied [`ValueSource`].
//! Structural violations (nesting, unmatched delimiters, dangling escapes)
//! fail the whole call; there is no partial output.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use stencil::{FormatOptions, default_plugins, format, format_with};
//!
//! let values = HashMap::from([("fruit", "cantaloupe")]);
//! assert_eq!(
//!     format("I like {{ fruit }}.", &values).unwrap(),
//!     "I like cantaloupe."
//! );
//!
//! let options = FormatOptions::new().with_plugins(default_plugins());
//! assert_eq!(
//!     format_with("{{ fruit | uppercase }}{# loudly #}!", &values, &options).unwrap(),
//!     "CANTALOUPE!"
//! );
//! ```
//!
//! Plugins are ordinary values implementing the [`Plugin`] contract; the
//! built-in pack ([`default_plugins`]) and the date pack (the
//! `stencil-date` crate) are opt-in registries of them.

pub mod builtins;
pub mod error;
pub mod format;
pub mod plugin;
pub mod value;
pub mod variables;

mod block;
mod machine;
mod scanner;

// Re-export main types at crate root
pub use builtins::default_plugins;
pub use error::{PluginError, TemplateError, TemplateResult};
pub use format::{FormatOptions, format, format_with};
pub use plugin::{FactoryFn, Plugin, PluginRegistry, TransformFn};
pub use value::{Value, ValueSource};
pub use variables::variables_used;
