//! Terminal implementation of the coordinator's [`Surface`]
//!
//! The input thread writes the buffer fields, the coordinator writes the
//! display fields. Each field has exactly one writer; the mutex only makes
//! the handoff visible across threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use regex_live::{FlagSet, HighlightedSegment, Surface};

/// State shared between the input thread and the coordinator task
#[derive(Debug, Default)]
pub struct SharedView {
    // Written by the input thread
    pub pattern: String,
    pub sample: String,
    pub flags: FlagSet,

    // Written by the coordinator
    pub segments: Vec<HighlightedSegment>,
    pub error: Option<String>,
    pub flag_indicator: String,
}

#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    shared: Arc<Mutex<SharedView>>,
}

impl TerminalSurface {
    pub fn new(sample: &str, flags: FlagSet) -> Self {
        let view = SharedView {
            sample: sample.to_string(),
            flags,
            segments: regex_live::highlight::plain(sample),
            ..SharedView::default()
        };
        Self {
            shared: Arc::new(Mutex::new(view)),
        }
    }

    /// Lock the shared view. A panic on the other side must not take the
    /// terminal down with it, so poisoning is ignored.
    pub fn view(&self) -> MutexGuard<'_, SharedView> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_pattern(&self, pattern: String) {
        self.view().pattern = pattern;
    }

    pub fn set_sample(&self, sample: String) {
        self.view().sample = sample;
    }

    pub fn set_flags(&self, flags: FlagSet) {
        self.view().flags = flags;
    }
}

impl Surface for TerminalSurface {
    fn pattern_source(&self) -> String {
        self.view().pattern.clone()
    }

    fn sample_text(&self) -> String {
        self.view().sample.clone()
    }

    fn flags(&self) -> FlagSet {
        self.view().flags
    }

    fn present_sample(&self, segments: Vec<HighlightedSegment>) {
        self.view().segments = segments;
    }

    fn present_error(&self, error: Option<String>) {
        self.view().error = error;
    }

    fn present_flags(&self, flags: String) {
        self.view().flag_indicator = flags;
    }
}
