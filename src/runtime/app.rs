use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use regex_live::coordinator::Notifier;
use regex_live::editable::{EditField, PatternField, SampleField, TextBufferMut};
use regex_live::messages::{ActiveBuffer, EditMsg};
use regex_live::theme::Theme;
use regex_live::FlagSet;

use super::input::handle_key;
use super::surface::TerminalSurface;
use super::terminal::TerminalSession;
use crate::view;

/// How long to wait for input before redrawing coordinator output
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The edit source: owns the buffers and flags, notifies the coordinator
pub struct App {
    pub(crate) pattern: PatternField,
    pub(crate) sample: SampleField,
    pub(crate) flags: FlagSet,
    pub(crate) active: ActiveBuffer,
    notifier: Notifier,
    surface: TerminalSurface,
    should_quit: bool,
}

impl App {
    pub fn new(sample: &str, flags: FlagSet, notifier: Notifier, surface: TerminalSurface) -> Self {
        Self {
            pattern: PatternField::pattern(""),
            sample: SampleField::sample(sample),
            flags,
            active: ActiveBuffer::default(),
            notifier,
            surface,
            should_quit: false,
        }
    }

    /// Raw pattern buffer contents, printed on exit
    pub fn pattern_source(&self) -> String {
        self.pattern.content()
    }

    /// Apply one edit. Buffer contents are published to the surface before the
    /// notification goes out, so the coordinator never reads an older buffer
    /// than the one that triggered it.
    pub fn update(&mut self, msg: EditMsg) {
        match msg {
            EditMsg::Quit => {
                tracing::info!("Quit requested");
                self.should_quit = true;
            }
            EditMsg::SwitchBuffer => {
                self.active = self.active.other();
            }
            EditMsg::ToggleFlag(flag) => {
                let enabled = self.flags.toggle(flag);
                tracing::debug!("Flag {} -> {}", flag.label(), enabled);
                self.surface.set_flags(self.flags);
                self.notifier.flags_toggled();
            }
            msg => match self.active {
                ActiveBuffer::Pattern => {
                    if edit_field(&mut self.pattern, msg) {
                        self.surface.set_pattern(self.pattern.content());
                        self.notifier.pattern_edited();
                    }
                }
                ActiveBuffer::Sample => {
                    if edit_field(&mut self.sample, msg) {
                        self.surface.set_sample(self.sample.content());
                        self.notifier.sample_edited();
                    }
                }
            },
        }
    }

    /// Input/draw loop; returns when the user quits
    pub fn run(&mut self, terminal: &mut TerminalSession, theme: &Theme) -> Result<()> {
        while !self.should_quit {
            {
                let app: &App = self;
                let shown = app.surface.view();
                terminal.draw(|frame| view::draw(frame, app, &shown, theme))?;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            let msg = match event::read()? {
                Event::Key(key) => handle_key(key),
                Event::Paste(text) => Some(EditMsg::Paste(text)),
                _ => None,
            };
            if let Some(msg) = msg {
                self.update(msg);
            }
        }
        Ok(())
    }
}

/// Apply a cursor/text message to one field, returning whether its content changed
fn edit_field<B: TextBufferMut>(field: &mut EditField<B>, msg: EditMsg) -> bool {
    match msg {
        EditMsg::InsertChar(ch) => field.insert_char(ch),
        EditMsg::InsertNewline => field.insert_newline(),
        EditMsg::Paste(text) => field.insert_str(&text),
        EditMsg::DeleteBackward => field.delete_backward(),
        EditMsg::DeleteForward => field.delete_forward(),
        EditMsg::MoveCursor(direction) => {
            field.move_cursor(direction);
            false
        }
        EditMsg::MoveCursorLineStart => {
            field.move_line_start();
            false
        }
        EditMsg::MoveCursorLineEnd => {
            field.move_line_end();
            false
        }
        EditMsg::SwitchBuffer | EditMsg::ToggleFlag(_) | EditMsg::Quit => false,
    }
}
