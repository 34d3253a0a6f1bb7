/*
 * variables.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Static analysis: which variables does a template reference?

use std::cell::RefCell;

use crate::error::TemplateResult;
use crate::format::format;
use crate::value::{Value, ValueSource};

/// A value source that records the names requested from it.
#[derive(Debug, Default)]
struct RecordingSource {
    seen: RefCell<Vec<String>>,
}

impl ValueSource for RecordingSource {
    fn get(&self, name: &str) -> Option<Value> {
        let mut seen = self.seen.borrow_mut();
        if !seen.iter().any(|recorded| recorded == name) {
            seen.push(name.to_string());
        }
        Some(Value::String(String::new()))
    }
}

/// Return the distinct variable names a template references, in first-use
/// order.
///
/// The template is driven through [`format`] with a recording value source,
/// so it must be structurally valid; errors propagate. Placeholders that
/// name plugins require those plugins to be resolvable, exactly as in a
/// real `format` call.
pub fn variables_used(template: &str) -> TemplateResult<Vec<String>> {
    let source = RecordingSource::default();
    format(template, &source)?;
    Ok(source.seen.into_inner())
}
