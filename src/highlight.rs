//! Match segmentation and alternating highlight
//!
//! [`find_matches`] produces the non-overlapping spans of a compiled pattern in
//! a text; [`render`] cuts the text into segments so every byte appears exactly
//! once, tagging the matched slices with an alternating [`HighlightClass`].
//!
//! ```text
//! [prefix][match 0][infix][match 1]...[suffix]
//!          Primary         Alternate
//! ```

use std::ops::Range;

use crate::matcher::CompiledPattern;

/// Half-open byte range `[start, end)` of one match in the sample text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} past end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<(usize, usize)> for MatchSpan {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Two-valued highlight band. Carries no meaning beyond match-index parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    /// Even match index (0, 2, 4, ...)
    Primary,
    /// Odd match index
    Alternate,
}

impl HighlightClass {
    pub fn for_match_index(index: usize) -> Self {
        if index % 2 == 0 {
            HighlightClass::Primary
        } else {
            HighlightClass::Alternate
        }
    }
}

/// A contiguous slice of the sample text, optionally highlighted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedSegment {
    pub text: String,
    pub class: Option<HighlightClass>,
}

impl HighlightedSegment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    pub fn highlighted(text: impl Into<String>, class: HighlightClass) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.class.is_some()
    }
}

/// All leftmost-first, non-overlapping matches of `pattern` in `text`
///
/// An empty match that abuts the end of the previous match is not reported,
/// so the result is always sorted with `spans[i + 1].start >= spans[i].end`.
pub fn find_matches(pattern: &CompiledPattern, text: &str) -> Vec<MatchSpan> {
    pattern
        .regex()
        .find_iter(text)
        .map(|m| MatchSpan::new(m.start(), m.end()))
        .collect()
}

/// Cut `text` into plain and highlighted segments
///
/// `spans` must be sorted and non-overlapping, with offsets on char
/// boundaries of `text`. With no spans the whole text is one plain segment.
/// Otherwise empty plain gaps are skipped, while every span yields a
/// highlighted segment (zero-width ones included) so the n-th highlighted
/// segment is always the n-th match.
pub fn render(text: &str, spans: &[MatchSpan]) -> Vec<HighlightedSegment> {
    if spans.is_empty() {
        return vec![HighlightedSegment::plain(text)];
    }

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut last_end = 0;

    for (index, span) in spans.iter().enumerate() {
        debug_assert!(
            span.start >= last_end,
            "span {:?} overlaps previous end {}",
            span,
            last_end
        );

        if span.start > last_end {
            segments.push(HighlightedSegment::plain(&text[last_end..span.start]));
        }
        segments.push(HighlightedSegment::highlighted(
            &text[span.range()],
            HighlightClass::for_match_index(index),
        ));
        last_end = span.end;
    }

    if last_end < text.len() {
        segments.push(HighlightedSegment::plain(&text[last_end..]));
    }

    segments
}

/// Match and render in one step
pub fn highlight(pattern: &CompiledPattern, text: &str) -> Vec<HighlightedSegment> {
    render(text, &find_matches(pattern, text))
}

/// The unhighlighted rendering of `text`
pub fn plain(text: &str) -> Vec<HighlightedSegment> {
    render(text, &[])
}

/// Reassemble the raw text of a rendering, ignoring highlight classes
pub fn concat(segments: &[HighlightedSegment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}
