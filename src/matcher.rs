//! Pattern compilation
//!
//! Turns the raw pattern buffer plus the current [`FlagSet`] into a compiled
//! regex. An empty pattern is a distinct "no pattern" state, not an error.

use std::fmt;

use regex::Regex;

use crate::flags::FlagSet;

/// A successfully compiled pattern
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    /// The full expression handed to the engine, inline flag group included
    pub fn expression(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// The regex engine rejected the pattern
///
/// `message` is the engine's own text, unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CompileError {}

/// Remove the first `'\n'` only. Edit buffers report their content with a
/// trailing newline; any other newline is part of the pattern.
pub fn strip_first_newline(source: &str) -> String {
    source.replacen('\n', "", 1)
}

/// Compile a raw pattern with the given flags
///
/// Returns `Ok(None)` when the pattern is empty after newline stripping.
pub fn compile(source: &str, flags: &FlagSet) -> Result<Option<CompiledPattern>, CompileError> {
    let source = strip_first_newline(source);
    if source.is_empty() {
        return Ok(None);
    }

    let expression = format!("{}{}", flags.inline_prefix(), source);
    match Regex::new(&expression) {
        Ok(regex) => Ok(Some(CompiledPattern { regex })),
        Err(e) => Err(CompileError {
            message: e.to_string(),
        }),
    }
}
