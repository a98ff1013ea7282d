//! Drawing
//!
//! ```text
//! ┌ Pattern ─────────────────── /iU/ ┐
//! │a.                                │
//! └──────────────────────────────────┘
//! ┌ Sample ──────────────────────────┐
//! │p[ar][an]orm[al]                  │
//! └──────────────────────────────────┘
//! ┌ Error ───────────────────────────┐
//! └──────────────────────────────────┘
//!  Tab switch · Alt+i/m/s/u flags · Esc quit
//! ```

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use regex_live::messages::ActiveBuffer;
use regex_live::theme::{Color, Theme};
use regex_live::HighlightedSegment;

use crate::runtime::surface::SharedView;
use crate::runtime::App;

const HINTS: &str = " Tab switch buffer · Alt+i/m/s/u toggle flags · Esc quit";

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

fn field_block(title: &str, active: bool) -> Block<'static> {
    let border_style = if active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Block::bordered()
        .title(format!(" {} ", title))
        .border_style(border_style)
}

pub fn draw(frame: &mut Frame, app: &App, shown: &SharedView, theme: &Theme) {
    let [pattern_area, sample_area, error_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let pattern_active = app.active == ActiveBuffer::Pattern;

    // Pattern, with the flag indicator in the top-right corner
    let flags = Line::from(format!(" /{}/ ", shown.flag_indicator)).right_aligned();
    let pattern_block = field_block("Pattern", pattern_active).title(flags);
    let pattern_inner = pattern_block.inner(pattern_area);
    frame.render_widget(
        Paragraph::new(app.pattern.content()).block(pattern_block),
        pattern_area,
    );

    // Sample, drawn from the coordinator's segments
    let sample_block = field_block("Sample", !pattern_active);
    let sample_inner = sample_block.inner(sample_area);
    let cursor = app.sample.cursor();
    let scroll = cursor
        .line
        .saturating_sub(sample_inner.height.saturating_sub(1) as usize);
    frame.render_widget(
        Paragraph::new(Text::from(segment_lines(&shown.segments, theme)))
            .block(sample_block)
            .scroll((scroll as u16, 0)),
        sample_area,
    );

    // Error text, verbatim
    let error = shown.error.as_deref().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(error)
            .style(Style::default().fg(term_color(theme.error)))
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(" Error ")),
        error_area,
    );

    frame.render_widget(
        Paragraph::new(HINTS).style(Style::default().add_modifier(Modifier::DIM)),
        hint_area,
    );

    let position = if pattern_active {
        cursor_position(pattern_inner, app.pattern.cursor().column, 0)
    } else {
        cursor_position(sample_inner, cursor.column, cursor.line - scroll)
    };
    frame.set_cursor_position(position);
}

fn cursor_position(area: Rect, column: usize, row: usize) -> Position {
    let x = area.x.saturating_add(column.min(u16::MAX as usize) as u16);
    let y = area.y.saturating_add(row.min(u16::MAX as usize) as u16);
    Position::new(x.min(area.right().saturating_sub(1)), y)
}

/// Split segments into terminal lines, styling highlighted ones
///
/// A lone match is drawn in the theme's single-match color.
fn segment_lines(segments: &[HighlightedSegment], theme: &Theme) -> Vec<Line<'static>> {
    let single_match = segments.iter().filter(|s| s.is_highlighted()).count() == 1;

    let mut lines = vec![Line::default()];
    for segment in segments {
        let style = match segment.class {
            Some(class) => {
                Style::default().bg(term_color(theme.highlight_color(class, single_match)))
            }
            None => Style::default(),
        };

        for (i, part) in segment.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if part.is_empty() {
                continue;
            }
            if let Some(line) = lines.last_mut() {
                line.push_span(Span::styled(part.to_string(), style));
            }
        }
    }
    lines
}
