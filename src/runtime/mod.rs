//! Runtime module - terminal integration
//!
//! This module contains the pieces that tie the core to a real terminal:
//! - `app` - edit source: buffers, flags, and the input/draw loop
//! - `input` - Keyboard event to message mapping
//! - `surface` - the coordinator's `Surface`, shared with the input thread
//! - `terminal` - raw-mode/alternate-screen lifetime

pub mod app;
pub mod input;
pub mod surface;
pub mod terminal;

pub use app::App;
pub use surface::TerminalSurface;
pub use terminal::TerminalSession;
