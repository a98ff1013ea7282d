//! Update coordinator
//!
//! The single task that turns change notifications into rendered output.
//!
//! ## Architecture
//!
//! ```text
//! edit source ──PatternEdited──┐
//! edit source ──SampleEdited───┼──► Coordinator::run (one task) ──► Surface
//! flag toggle ──FlagsToggled───┘        owns Session
//! ```
//!
//! Producers hold a [`Notifier`] and send on unbounded queues, so they never
//! wait. The coordinator is the only code that touches the [`Session`]
//! (compiled pattern, match spans), which is what makes the derived state
//! race-free without locks. Buffers are read through the [`Surface`] at
//! handling time, so a burst of edits may collapse into a single pass.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::flags::FlagSet;
use crate::highlight::{self, HighlightedSegment, MatchSpan};
use crate::matcher::{self, CompileError, CompiledPattern};
use crate::messages::Notification;

/// Tracing target for the pattern-edit trace sink
pub const PATTERN_EDITS_TARGET: &str = "pattern_edits";

/// The coordinator's view of the editing surface
///
/// Reads return the live buffer contents. Writes replace what the matching
/// display shows. Implementations are shared with the input side, hence `&self`.
pub trait Surface: Send + Sync + 'static {
    /// Raw pattern buffer contents
    fn pattern_source(&self) -> String;
    /// Raw sample buffer contents
    fn sample_text(&self) -> String;
    /// Current flag state
    fn flags(&self) -> FlagSet;

    /// Replace the sample display
    fn present_sample(&self, segments: Vec<HighlightedSegment>);
    /// Replace the error display (`None` clears it)
    fn present_error(&self, error: Option<String>);
    /// Replace the flag indicator
    fn present_flags(&self, flags: String);
}

/// Cloneable producer handle for the three notification queues
#[derive(Debug, Clone)]
pub struct Notifier {
    pattern_tx: UnboundedSender<()>,
    sample_tx: UnboundedSender<()>,
    flags_tx: UnboundedSender<()>,
}

impl Notifier {
    /// Enqueue a notification. Never blocks; a closed queue is ignored.
    pub fn notify(&self, notification: Notification) {
        let tx = match notification {
            Notification::PatternEdited => &self.pattern_tx,
            Notification::SampleEdited => &self.sample_tx,
            Notification::FlagsToggled => &self.flags_tx,
        };
        if tx.send(()).is_err() {
            tracing::debug!("Coordinator gone, dropping {:?}", notification);
        }
    }

    pub fn pattern_edited(&self) {
        self.notify(Notification::PatternEdited);
    }

    pub fn sample_edited(&self) {
        self.notify(Notification::SampleEdited);
    }

    /// A toggle changes the compiled pattern as well as the indicator
    pub fn flags_toggled(&self) {
        self.notify(Notification::PatternEdited);
        self.notify(Notification::FlagsToggled);
    }
}

/// Consumer side of the notification queues
#[derive(Debug)]
pub struct NotificationQueues {
    pattern_rx: UnboundedReceiver<()>,
    sample_rx: UnboundedReceiver<()>,
    flags_rx: UnboundedReceiver<()>,
}

impl NotificationQueues {
    /// Wait for the next notification from any queue
    ///
    /// Returns `None` once every producer handle has been dropped.
    pub async fn recv(&mut self) -> Option<Notification> {
        tokio::select! {
            Some(()) = self.pattern_rx.recv() => Some(Notification::PatternEdited),
            Some(()) = self.flags_rx.recv() => Some(Notification::FlagsToggled),
            Some(()) = self.sample_rx.recv() => Some(Notification::SampleEdited),
            else => None,
        }
    }

    /// Discard notifications of the same class already waiting in the queue,
    /// returning how many were dropped
    pub fn drain(&mut self, notification: Notification) -> usize {
        let rx = match notification {
            Notification::PatternEdited => &mut self.pattern_rx,
            Notification::SampleEdited => &mut self.sample_rx,
            Notification::FlagsToggled => &mut self.flags_rx,
        };
        let mut dropped = 0;
        while rx.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }
}

/// Create the three notification queues
pub fn channel() -> (Notifier, NotificationQueues) {
    let (pattern_tx, pattern_rx) = mpsc::unbounded_channel();
    let (sample_tx, sample_rx) = mpsc::unbounded_channel();
    let (flags_tx, flags_rx) = mpsc::unbounded_channel();

    (
        Notifier {
            pattern_tx,
            sample_tx,
            flags_tx,
        },
        NotificationQueues {
            pattern_rx,
            sample_rx,
            flags_rx,
        },
    )
}

/// Counters for the passes the coordinator ran
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Pattern passes (pattern edit or flag toggle)
    pub pattern_passes: usize,
    /// Sample-only passes
    pub sample_passes: usize,
    /// Calls into the regex compiler
    pub compiles: usize,
    /// Notifications absorbed by coalescing
    pub coalesced: usize,
}

/// Derived state, owned by the coordinator task
#[derive(Debug, Default)]
pub struct Session {
    pattern: Option<CompiledPattern>,
    spans: Vec<MatchSpan>,
    last_error: Option<CompileError>,
    stats: PassStats,
}

impl Session {
    /// The pattern used for sample-edit passes
    ///
    /// After a failed recompile this is still the last pattern that compiled.
    pub fn pattern(&self) -> Option<&CompiledPattern> {
        self.pattern.as_ref()
    }

    /// Spans from the most recent highlighted render; empty after an
    /// unhighlighted one
    pub fn spans(&self) -> &[MatchSpan] {
        &self.spans
    }

    /// Error from the most recent compile, if it failed
    pub fn last_error(&self) -> Option<&CompileError> {
        self.last_error.as_ref()
    }

    pub fn stats(&self) -> PassStats {
        self.stats
    }
}

/// Recompute-and-render driver
pub struct Coordinator<S: Surface> {
    surface: S,
    session: Session,
}

impl<S: Surface> Coordinator<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume notifications until every producer is gone
    ///
    /// Runs one pass up front so the initial sample is shown before the first
    /// edit. Returns the final session state.
    pub async fn run(mut self, mut queues: NotificationQueues) -> Session {
        tracing::info!("Coordinator started");
        self.initial_pass();

        while let Some(notification) = queues.recv().await {
            let coalesced = queues.drain(notification);
            self.session.stats.coalesced += coalesced;
            if coalesced > 0 {
                tracing::trace!("Coalesced {} x {:?}", coalesced, notification);
            }
            if notification == Notification::PatternEdited {
                self.trace_pattern_edits(1 + coalesced);
            }
            self.handle(notification);
        }

        tracing::info!(stats = ?self.session.stats, "Coordinator stopped");
        self.session
    }

    /// Publish the flag indicator and run a pattern pass
    pub fn initial_pass(&mut self) {
        self.surface.present_flags(self.surface.flags().serialize());
        self.on_pattern_edited();
    }

    /// Process one notification
    pub fn handle(&mut self, notification: Notification) {
        match notification {
            Notification::PatternEdited => self.on_pattern_edited(),
            Notification::FlagsToggled => self.on_flags_toggled(),
            Notification::SampleEdited => self.on_sample_edited(),
        }
    }

    /// One `pattern_edits` event per received `PatternEdited`, coalesced
    /// ones included. They all carry the pattern as it reads now.
    fn trace_pattern_edits(&self, count: usize) {
        if !tracing::enabled!(target: PATTERN_EDITS_TARGET, tracing::Level::DEBUG) {
            return;
        }
        let source = self.surface.pattern_source();
        for _ in 0..count {
            tracing::debug!(target: PATTERN_EDITS_TARGET, pattern = %source);
        }
    }

    fn on_flags_toggled(&mut self) {
        let flags = self.surface.flags();
        self.surface.present_flags(flags.serialize());
        self.recompile(flags);
    }

    fn on_pattern_edited(&mut self) {
        let flags = self.surface.flags();
        self.recompile(flags);
    }

    fn recompile(&mut self, flags: FlagSet) {
        self.session.stats.pattern_passes += 1;

        let source = self.surface.pattern_source();
        tracing::debug!("Pattern pass: {:?} /{}/", source, flags);

        let sample = self.surface.sample_text();
        self.session.stats.compiles += 1;

        match matcher::compile(&source, &flags) {
            Ok(None) => {
                tracing::debug!("Empty pattern, clearing matches");
                self.session.pattern = None;
                self.session.last_error = None;
                self.present_plain(&sample);
                self.surface.present_error(None);
            }
            Err(error) => {
                // The previous pattern stays in place for sample edits
                tracing::debug!("Pattern failed to compile: {}", error);
                self.present_plain(&sample);
                self.surface.present_error(Some(error.message.clone()));
                self.session.last_error = Some(error);
            }
            Ok(Some(pattern)) => {
                tracing::debug!("Compiled {:?}", pattern.expression());
                self.session.last_error = None;
                self.present_matches(&pattern, &sample);
                self.session.pattern = Some(pattern);
                self.surface.present_error(None);
            }
        }
    }

    fn on_sample_edited(&mut self) {
        self.session.stats.sample_passes += 1;

        let sample = self.surface.sample_text();
        match self.session.pattern.take() {
            Some(pattern) => {
                self.present_matches(&pattern, &sample);
                self.session.pattern = Some(pattern);
            }
            None => self.present_plain(&sample),
        }
    }

    fn present_matches(&mut self, pattern: &CompiledPattern, sample: &str) {
        let spans = highlight::find_matches(pattern, sample);
        tracing::trace!("{} matches", spans.len());
        self.surface.present_sample(highlight::render(sample, &spans));
        self.session.spans = spans;
    }

    fn present_plain(&mut self, sample: &str) {
        self.session.spans.clear();
        self.surface.present_sample(highlight::plain(sample));
    }
}
