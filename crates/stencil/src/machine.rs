/*
 * machine.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The formatting state machine.
//!
//! One [`Mode`] is active at a time; there is no stack, so nesting the same
//! construct is structurally impossible and is reported rather than
//! silently merged. [`step`] is a pure transition function over (mode,
//! fragment); the driving loop in [`format`](crate::format::format) owns
//! output accumulation and placeholder resolution.

use crate::error::{TemplateError, TemplateResult};
use crate::scanner::{Delimiter, leading_delimiter};

/// The scanner's current lexical mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Ordinary literal text. Initial mode, and the only accepting one.
    Text,
    /// Inside `{{ }}`.
    Placeholder,
    /// Inside `{# #}`.
    Comment,
    /// The previous fragment was the escape marker `\`.
    Escape,
}

/// What the driving loop should do with a fragment.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action<'t> {
    /// Nothing to emit.
    Nothing,
    /// Append literal text to the output.
    Emit(&'t str),
    /// Resolve a placeholder body and append the substitution.
    Resolve(&'t str),
}

/// Advance the machine by one fragment.
///
/// Any transition not listed in the match below is a validation failure,
/// not a silent default.
pub(crate) fn step<'t>(mode: Mode, fragment: &'t str) -> TemplateResult<(Mode, Action<'t>)> {
    // An escape swallows the following fragment whole: its leading
    // characters are never reinterpreted as delimiters.
    if mode == Mode::Escape {
        return Ok((Mode::Text, Action::Emit(fragment)));
    }

    match leading_delimiter(fragment) {
        Some(Delimiter::Escape) => match mode {
            Mode::Text => Ok((Mode::Escape, Action::Nothing)),
            _ => Err(TemplateError::structural(
                "unexpected escape \\, you can not escape inside a {{ }} block or a comment",
            )),
        },

        Some(Delimiter::CommentOpen) => match mode {
            Mode::Text => Ok((Mode::Comment, Action::Nothing)),
            _ => Err(TemplateError::structural("unexpected {#")),
        },

        Some(Delimiter::CommentClose) => match mode {
            // Text after the close delimiter is literal output.
            Mode::Comment => Ok((Mode::Text, Action::Emit(&fragment[2..]))),
            _ => Err(TemplateError::structural(
                "encountered #} that does not match any opening {#",
            )),
        },

        Some(Delimiter::PlaceholderOpen) => match mode {
            // Comments swallow placeholder syntax.
            Mode::Comment => Ok((Mode::Comment, Action::Nothing)),
            Mode::Placeholder => Err(TemplateError::structural(
                "{{ }} blocks can not be nested",
            )),
            _ => Ok((Mode::Placeholder, Action::Resolve(&fragment[2..]))),
        },

        Some(Delimiter::PlaceholderClose) => match mode {
            Mode::Comment => Ok((Mode::Comment, Action::Nothing)),
            // The substitution was already emitted at open; text after the
            // close delimiter is literal output.
            Mode::Placeholder => Ok((Mode::Text, Action::Emit(&fragment[2..]))),
            _ => Err(TemplateError::structural(
                "encountered }} that does not match any opening {{",
            )),
        },

        None => match mode {
            // Comment bodies are discarded entirely.
            Mode::Comment => Ok((Mode::Comment, Action::Nothing)),
            // A placeholder's body is consumed when it opens; literal text
            // before the close has no defined meaning.
            Mode::Placeholder => Err(TemplateError::structural(
                "unexpected text inside a {{ }} block",
            )),
            _ => Ok((Mode::Text, Action::Emit(fragment))),
        },
    }
}
