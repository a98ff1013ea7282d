//! A text buffer with a single cursor.

use super::buffer::{RopeBuffer, StringBuffer, TextBuffer, TextBufferMut};
use crate::messages::Direction;

/// A position in the buffer (line and column, both 0-indexed, in chars).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Editable buffer plus cursor
///
/// Every mutating method returns `true` when the buffer content changed, so
/// the caller knows whether to notify.
#[derive(Debug, Clone)]
pub struct EditField<B: TextBufferMut> {
    buffer: B,
    cursor: Position,
    /// Column to return to when moving vertically through shorter lines
    desired_column: Option<usize>,
    multi_line: bool,
}

/// One-line field for the pattern
pub type PatternField = EditField<StringBuffer>;
/// Multi-line field for the sample text
pub type SampleField = EditField<RopeBuffer>;

impl PatternField {
    pub fn pattern(text: &str) -> Self {
        Self::new(StringBuffer::from_text(text), false)
    }
}

impl SampleField {
    pub fn sample(text: &str) -> Self {
        Self::new(RopeBuffer::from_text(text), true)
    }
}

impl<B: TextBufferMut> EditField<B> {
    /// Create a field with the cursor at the start of the buffer
    pub fn new(buffer: B, multi_line: bool) -> Self {
        Self {
            buffer,
            cursor: Position::default(),
            desired_column: None,
            multi_line,
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn content(&self) -> String {
        self.buffer.content()
    }

    fn cursor_offset(&self) -> usize {
        self.buffer
            .position_to_offset(self.cursor.line, self.cursor.column)
    }

    fn set_cursor_offset(&mut self, offset: usize) {
        let (line, column) = self.buffer.offset_to_position(offset);
        self.cursor = Position::new(line, column);
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let offset = self.cursor_offset();
        self.buffer.insert_char(offset, ch);
        self.set_cursor_offset(offset + 1);
        self.desired_column = None;
        true
    }

    /// Insert a newline; ignored in one-line fields
    pub fn insert_newline(&mut self) -> bool {
        if !self.multi_line {
            return false;
        }
        self.insert_char('\n')
    }

    pub fn insert_str(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let offset = self.cursor_offset();
        self.buffer.insert(offset, text);
        self.set_cursor_offset(offset + text.chars().count());
        self.desired_column = None;
        true
    }

    pub fn delete_backward(&mut self) -> bool {
        let offset = self.cursor_offset();
        if offset == 0 {
            return false;
        }
        self.buffer.remove(offset - 1..offset);
        self.set_cursor_offset(offset - 1);
        self.desired_column = None;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        let offset = self.cursor_offset();
        if offset >= self.buffer.len_chars() {
            return false;
        }
        self.buffer.remove(offset..offset + 1);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                let offset = self.cursor_offset();
                self.set_cursor_offset(offset.saturating_sub(1));
                self.desired_column = None;
            }
            Direction::Right => {
                let offset = self.cursor_offset();
                self.set_cursor_offset((offset + 1).min(self.buffer.len_chars()));
                self.desired_column = None;
            }
            Direction::Up => {
                if self.cursor.line > 0 {
                    self.move_vertically(self.cursor.line - 1);
                }
            }
            Direction::Down => {
                if self.cursor.line + 1 < self.buffer.line_count() {
                    self.move_vertically(self.cursor.line + 1);
                }
            }
        }
    }

    fn move_vertically(&mut self, line: usize) {
        let desired = *self.desired_column.get_or_insert(self.cursor.column);
        self.cursor = Position::new(line, desired.min(self.buffer.line_length(line)));
    }

    pub fn move_line_start(&mut self) {
        self.cursor.column = 0;
        self.desired_column = None;
    }

    pub fn move_line_end(&mut self) {
        self.cursor.column = self.buffer.line_length(self.cursor.line);
        self.desired_column = None;
    }
}
