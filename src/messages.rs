//! Message types
//!
//! `Notification` is what edit sources send to the coordinator; `EditMsg` is
//! what the terminal input layer produces from raw key events.

use crate::flags::Flag;

/// Payload-free change signal sent to the coordinator
///
/// Handlers always re-read the current buffers, so a notification only says
/// *which* input changed, never *what* it changed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// The pattern buffer changed
    PatternEdited,
    /// The sample buffer changed
    SampleEdited,
    /// A flag was toggled
    FlagsToggled,
}

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which buffer receives edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveBuffer {
    Pattern,
    #[default]
    Sample,
}

impl ActiveBuffer {
    pub fn other(self) -> Self {
        match self {
            ActiveBuffer::Pattern => ActiveBuffer::Sample,
            ActiveBuffer::Sample => ActiveBuffer::Pattern,
        }
    }
}

/// Editing-surface messages (keystrokes already translated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMsg {
    /// Insert a character at cursor
    InsertChar(char),
    /// Insert a newline at cursor (sample buffer only)
    InsertNewline,
    /// Insert pasted text at cursor
    Paste(String),
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to start of line (Home key)
    MoveCursorLineStart,
    /// Move cursor to end of line (End key)
    MoveCursorLineEnd,
    /// Switch between the pattern and sample buffers (Tab)
    SwitchBuffer,
    /// Flip one regex flag
    ToggleFlag(Flag),
    /// End the session
    Quit,
}
