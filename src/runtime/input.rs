//! Keyboard input handling
//!
//! Translates crossterm key events into [`EditMsg`]s:
//! - Ctrl+C / Esc quit
//! - Tab switches between the pattern and sample buffers
//! - Alt+i / Alt+m / Alt+s / Alt+u toggle flags
//! - everything else edits or moves the cursor in the active buffer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use regex_live::messages::{Direction, EditMsg};
use regex_live::Flag;

/// Map a key event to an edit message, or `None` if the key is unbound
pub fn handle_key(key: KeyEvent) -> Option<EditMsg> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(EditMsg::Quit),
        KeyCode::Esc => Some(EditMsg::Quit),

        KeyCode::Char(c) if alt => flag_for_key(c).map(EditMsg::ToggleFlag),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(EditMsg::InsertChar(c)),

        KeyCode::Tab | KeyCode::BackTab => Some(EditMsg::SwitchBuffer),
        KeyCode::Enter => Some(EditMsg::InsertNewline),
        KeyCode::Backspace => Some(EditMsg::DeleteBackward),
        KeyCode::Delete => Some(EditMsg::DeleteForward),

        KeyCode::Up => Some(EditMsg::MoveCursor(Direction::Up)),
        KeyCode::Down => Some(EditMsg::MoveCursor(Direction::Down)),
        KeyCode::Left => Some(EditMsg::MoveCursor(Direction::Left)),
        KeyCode::Right => Some(EditMsg::MoveCursor(Direction::Right)),
        KeyCode::Home => Some(EditMsg::MoveCursorLineStart),
        KeyCode::End => Some(EditMsg::MoveCursorLineEnd),

        _ => None,
    }
}

/// Alt+letter flag shortcuts. `u` stands for the ungreedy `U` flag.
fn flag_for_key(c: char) -> Option<Flag> {
    match c.to_ascii_lowercase() {
        'i' => Some(Flag::CaseInsensitive),
        'm' => Some(Flag::MultiLine),
        's' => Some(Flag::DotMatchesNewline),
        'u' => Some(Flag::Ungreedy),
        _ => None,
    }
}
