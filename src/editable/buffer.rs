//! Text buffer traits and implementations for the pattern and sample fields.
//!
//! `TextBuffer` (read-only) and `TextBufferMut` (read-write) abstract over a
//! `String` backend for the one-line pattern and a `Rope` for the sample text.
//! All offsets are in characters, not bytes.

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;

/// Read-only view into a text buffer for cursor navigation and rendering.
pub trait TextBuffer {
    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Length of a specific line in characters (excluding newline)
    fn line_length(&self, line: usize) -> usize;

    /// Total length in characters
    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Get line content (without trailing newline)
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Convert (line, column) to char offset, clamping the column to the line
    fn position_to_offset(&self, line: usize, column: usize) -> usize;

    /// Convert char offset to (line, column)
    fn offset_to_position(&self, offset: usize) -> (usize, usize);

    /// Full content as String
    fn content(&self) -> String;
}

/// Mutable buffer operations. Extends TextBuffer.
pub trait TextBufferMut: TextBuffer {
    /// Insert text at character offset
    fn insert(&mut self, offset: usize, text: &str);

    /// Remove text in character range
    fn remove(&mut self, range: Range<usize>);

    fn insert_char(&mut self, offset: usize, ch: char) {
        let mut utf8 = [0u8; 4];
        self.insert(offset, ch.encode_utf8(&mut utf8));
    }
}

// =============================================================================
// StringBuffer - the pattern field
// =============================================================================

/// Single-line buffer wrapping String.
///
/// Newlines can still arrive through paste; they are kept verbatim and the
/// buffer keeps reporting one line.
#[derive(Debug, Clone, Default)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl TextBuffer for StringBuffer {
    fn line_count(&self) -> usize {
        1
    }

    fn line_length(&self, line: usize) -> usize {
        if line == 0 {
            self.len_chars()
        } else {
            0
        }
    }

    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        (line == 0).then_some(Cow::Borrowed(self.text.as_str()))
    }

    fn position_to_offset(&self, line: usize, column: usize) -> usize {
        if line != 0 {
            return self.len_chars();
        }
        column.min(self.len_chars())
    }

    fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        (0, offset.min(self.len_chars()))
    }

    fn content(&self) -> String {
        self.text.clone()
    }
}

impl TextBufferMut for StringBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let byte_offset = self.char_to_byte(offset);
        self.text.insert_str(byte_offset, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start_byte = self.char_to_byte(range.start);
        let end_byte = self.char_to_byte(range.end);
        if start_byte < end_byte {
            self.text.replace_range(start_byte..end_byte, "");
        }
    }
}

// =============================================================================
// RopeBuffer - the sample field
// =============================================================================

/// Multi-line buffer wrapping ropey::Rope.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl TextBuffer for RopeBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    fn line_length(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        let mut len = line_slice.len_chars();
        if len > 0 && line_slice.char(len - 1) == '\n' {
            len -= 1;
        }
        // CRLF: the cursor never sits between '\r' and '\n'
        if len > 0 && line_slice.char(len - 1) == '\r' {
            len -= 1;
        }
        len
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let text = self.rope.line(line).slice(..self.line_length(line));
        Some(Cow::Owned(text.to_string()))
    }

    fn position_to_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line) + column.min(self.line_length(line))
    }

    fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(clamped);
        (line, clamped - self.rope.line_to_char(line))
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }
}

impl TextBufferMut for RopeBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let clamped = offset.min(self.len_chars());
        self.rope.insert(clamped, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }
}
