//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use regex_live::highlight::concat;
use regex_live::{Flag, FlagSet, HighlightedSegment, Surface};

/// Everything a [`RecordingSurface`] has seen
#[derive(Debug, Default)]
pub struct Recorded {
    pub pattern: String,
    pub sample: String,
    pub flags: FlagSet,

    pub renders: Vec<Vec<HighlightedSegment>>,
    pub errors: Vec<Option<String>>,
    pub flag_indicators: Vec<String>,

    pub pattern_reads: usize,
    pub sample_reads: usize,
    pub flag_reads: usize,
}

/// In-memory surface that records every read and write
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingSurface {
    pub fn new(pattern: &str, sample: &str) -> Self {
        let surface = Self::default();
        {
            let mut inner = surface.inner();
            inner.pattern = pattern.to_string();
            inner.sample = sample.to_string();
        }
        surface
    }

    pub fn inner(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap()
    }

    pub fn set_pattern(&self, pattern: &str) {
        self.inner().pattern = pattern.to_string();
    }

    pub fn set_sample(&self, sample: &str) {
        self.inner().sample = sample.to_string();
    }

    pub fn toggle(&self, flag: Flag) {
        self.inner().flags.toggle(flag);
    }

    pub fn last_render(&self) -> Vec<HighlightedSegment> {
        self.inner().renders.last().cloned().expect("nothing rendered")
    }

    /// Text of the highlighted segments in the last render
    pub fn last_highlights(&self) -> Vec<String> {
        self.last_render()
            .into_iter()
            .filter(|s| s.is_highlighted())
            .map(|s| s.text)
            .collect()
    }

    pub fn last_render_text(&self) -> String {
        concat(&self.last_render())
    }

    /// Most recent error write (`None` if it was a clear)
    pub fn last_error(&self) -> Option<String> {
        self.inner().errors.last().cloned().flatten()
    }

    pub fn last_flag_indicator(&self) -> Option<String> {
        self.inner().flag_indicators.last().cloned()
    }

    pub fn render_count(&self) -> usize {
        self.inner().renders.len()
    }
}

impl Surface for RecordingSurface {
    fn pattern_source(&self) -> String {
        let mut inner = self.inner();
        inner.pattern_reads += 1;
        inner.pattern.clone()
    }

    fn sample_text(&self) -> String {
        let mut inner = self.inner();
        inner.sample_reads += 1;
        inner.sample.clone()
    }

    fn flags(&self) -> FlagSet {
        let mut inner = self.inner();
        inner.flag_reads += 1;
        inner.flags
    }

    fn present_sample(&self, segments: Vec<HighlightedSegment>) {
        self.inner().renders.push(segments);
    }

    fn present_error(&self, error: Option<String>) {
        self.inner().errors.push(error);
    }

    fn present_flags(&self, flags: String) {
        self.inner().flag_indicators.push(flags);
    }
}

/// True if no highlighted segment appears in the rendering
pub fn is_plain(segments: &[HighlightedSegment]) -> bool {
    segments.iter().all(|s| !s.is_highlighted())
}

/// In-memory log writer for checking what a tracing layer wrote
#[derive(Debug, Clone, Default)]
pub struct CapturedLog {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLog {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
