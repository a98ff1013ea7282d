//! Text editing for the two input fields.
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: traits abstracting over buffer implementations
//! - [`StringBuffer`]: backs the one-line pattern field (`String`)
//! - [`RopeBuffer`]: backs the multi-line sample field (`ropey::Rope`)
//! - [`EditField`]: a buffer plus its cursor
//!
//! # Example
//!
//! ```
//! use regex_live::editable::PatternField;
//!
//! let mut field = PatternField::pattern("a");
//! field.move_line_end();
//! field.insert_char('.');
//!
//! assert_eq!(field.content(), "a.");
//! ```

mod buffer;
mod field;

pub use buffer::{RopeBuffer, StringBuffer, TextBuffer, TextBufferMut};
pub use field::{EditField, PatternField, Position, SampleField};
