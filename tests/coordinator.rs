//! Coordinator tests
//!
//! Drives the coordinator against a recording surface, both one notification
//! at a time and through the real queues.

mod common;

use common::{is_plain, CapturedLog, RecordingSurface};
use regex_live::coordinator::{self, Coordinator};
use regex_live::{Flag, HighlightClass, HighlightedSegment, MatchSpan, Notification};
use tracing_subscriber::layer::SubscriberExt;

fn started(pattern: &str, sample: &str) -> (Coordinator<RecordingSurface>, RecordingSurface) {
    let surface = RecordingSurface::new(pattern, sample);
    let mut coordinator = Coordinator::new(surface.clone());
    coordinator.initial_pass();
    (coordinator, surface)
}

// ========================================================================
// Pattern passes
// ========================================================================

#[test]
fn test_initial_pass_with_empty_pattern_shows_plain_sample() {
    let (coordinator, surface) = started("", "paranormal");

    assert_eq!(surface.last_render(), vec![HighlightedSegment::plain("paranormal")]);
    assert_eq!(surface.last_error(), None);
    assert_eq!(surface.last_flag_indicator().as_deref(), Some(""));
    assert!(coordinator.session().pattern().is_none());
    assert!(coordinator.session().spans().is_empty());
}

#[test]
fn test_paranormal_example() {
    let (mut coordinator, surface) = started("", "paranormal");
    surface.set_pattern("a.");
    coordinator.handle(Notification::PatternEdited);

    assert_eq!(
        coordinator.session().spans(),
        &[
            MatchSpan::new(1, 3),
            MatchSpan::new(3, 5),
            MatchSpan::new(8, 10)
        ]
    );
    assert_eq!(
        surface.last_render(),
        vec![
            HighlightedSegment::plain("p"),
            HighlightedSegment::highlighted("ar", HighlightClass::Primary),
            HighlightedSegment::highlighted("an", HighlightClass::Alternate),
            HighlightedSegment::plain("orm"),
            HighlightedSegment::highlighted("al", HighlightClass::Primary),
        ]
    );
    assert_eq!(surface.last_render_text(), "paranormal");
    assert_eq!(surface.last_error(), None);
}

#[test]
fn test_trailing_buffer_newline_is_ignored() {
    let (mut coordinator, surface) = started("", "paranormal");
    surface.set_pattern("a.\n");
    coordinator.handle(Notification::PatternEdited);

    assert_eq!(coordinator.session().pattern().unwrap().expression(), "a.");
    assert_eq!(surface.last_highlights(), vec!["ar", "an", "al"]);
}

#[test]
fn test_compile_error_is_surfaced_verbatim() {
    let (mut coordinator, surface) = started("", "paranormal");
    surface.set_pattern("(");
    coordinator.handle(Notification::PatternEdited);

    let expected = regex::Regex::new("(").unwrap_err().to_string();
    assert_eq!(surface.last_error(), Some(expected.clone()));
    assert_eq!(
        coordinator.session().last_error().map(|e| e.message.clone()),
        Some(expected)
    );
    assert_eq!(surface.last_render(), vec![HighlightedSegment::plain("paranormal")]);

    // Still accepting input: the next valid pattern clears the error
    surface.set_pattern("(a)");
    coordinator.handle(Notification::PatternEdited);
    assert_eq!(surface.last_error(), None);
    assert!(coordinator.session().last_error().is_none());
    assert_eq!(surface.last_highlights(), vec!["a", "a", "a"]);
}

#[test]
fn test_failed_recompile_retains_last_good_pattern() {
    let (mut coordinator, surface) = started("a.", "paranormal");
    assert_eq!(surface.last_highlights(), vec!["ar", "an", "al"]);

    surface.set_pattern("a.(");
    coordinator.handle(Notification::PatternEdited);
    assert!(is_plain(&surface.last_render()));
    assert!(coordinator.session().spans().is_empty());
    assert_eq!(coordinator.session().pattern().unwrap().expression(), "a.");

    // A sample edit rematches with the retained pattern
    surface.set_sample("banana");
    coordinator.handle(Notification::SampleEdited);
    assert_eq!(surface.last_highlights(), vec!["an", "an"]);
    assert!(surface.last_error().is_some(), "error stays until the pattern compiles");
}

#[test]
fn test_empty_pattern_drops_retained_pattern() {
    let (mut coordinator, surface) = started("a.", "paranormal");

    surface.set_pattern("");
    coordinator.handle(Notification::PatternEdited);
    assert!(coordinator.session().pattern().is_none());
    assert_eq!(surface.last_render(), vec![HighlightedSegment::plain("paranormal")]);
    assert_eq!(surface.last_error(), None);

    surface.set_sample("banana");
    coordinator.handle(Notification::SampleEdited);
    assert_eq!(surface.last_render(), vec![HighlightedSegment::plain("banana")]);
}

#[test]
fn test_empty_pattern_law_holds_with_flags_set() {
    let (mut coordinator, surface) = started("", "Some Text");
    surface.toggle(Flag::CaseInsensitive);
    surface.toggle(Flag::Ungreedy);
    coordinator.handle(Notification::FlagsToggled);

    assert!(coordinator.session().spans().is_empty());
    assert_eq!(surface.last_render(), vec![HighlightedSegment::plain("Some Text")]);
    assert_eq!(surface.last_error(), None);
}

// ========================================================================
// Flags
// ========================================================================

#[test]
fn test_flag_toggle_recompiles_and_updates_indicator() {
    let (mut coordinator, surface) = started("abc", "ABC abc");
    assert_eq!(surface.last_highlights(), vec!["abc"]);

    surface.toggle(Flag::CaseInsensitive);
    coordinator.handle(Notification::FlagsToggled);
    assert_eq!(surface.last_flag_indicator().as_deref(), Some("i"));
    assert_eq!(surface.last_highlights(), vec!["ABC", "abc"]);

    surface.toggle(Flag::Ungreedy);
    coordinator.handle(Notification::FlagsToggled);
    assert_eq!(surface.last_flag_indicator().as_deref(), Some("iU"));

    surface.toggle(Flag::CaseInsensitive);
    coordinator.handle(Notification::FlagsToggled);
    assert_eq!(surface.last_flag_indicator().as_deref(), Some("U"));
    assert_eq!(surface.last_highlights(), vec!["abc"]);
}

#[test]
fn test_dot_matches_newline_flag() {
    let (mut coordinator, surface) = started("a.b", "a\nb");
    assert!(is_plain(&surface.last_render()));

    surface.toggle(Flag::DotMatchesNewline);
    coordinator.handle(Notification::FlagsToggled);
    assert_eq!(surface.last_highlights(), vec!["a\nb"]);
}

// ========================================================================
// Sample passes
// ========================================================================

#[test]
fn test_sample_edit_rematches_without_recompiling() {
    let (mut coordinator, surface) = started("a.", "paranormal");
    let compiles = coordinator.session().stats().compiles;
    let (pattern_reads, flag_reads) = {
        let inner = surface.inner();
        (inner.pattern_reads, inner.flag_reads)
    };

    surface.set_sample("banana");
    coordinator.handle(Notification::SampleEdited);

    assert_eq!(surface.last_highlights(), vec!["an", "an"]);
    assert_eq!(coordinator.session().stats().compiles, compiles);
    assert_eq!(coordinator.session().stats().sample_passes, 1);
    let inner = surface.inner();
    assert_eq!(inner.pattern_reads, pattern_reads);
    assert_eq!(inner.flag_reads, flag_reads);
}

#[test]
fn test_sample_edit_without_pattern_renders_plain() {
    let (mut coordinator, surface) = started("", "one");
    surface.set_sample("two");
    coordinator.handle(Notification::SampleEdited);
    assert_eq!(surface.last_render(), vec![HighlightedSegment::plain("two")]);
}

#[test]
fn test_sample_edit_ignores_unsent_pattern_change() {
    let (mut coordinator, surface) = started("a.", "paranormal");

    // The pattern buffer changed, but only a sample notification arrived
    surface.set_pattern("n.");
    surface.set_sample("paranormal!");
    coordinator.handle(Notification::SampleEdited);

    assert_eq!(surface.last_highlights(), vec!["ar", "an", "al"]);
}

// ========================================================================
// Queue-driven loop
// ========================================================================

#[tokio::test]
async fn test_run_returns_session_when_producers_drop() {
    let surface = RecordingSurface::new("", "paranormal");
    let (notifier, queues) = coordinator::channel();
    let task = tokio::spawn(Coordinator::new(surface.clone()).run(queues));

    surface.set_pattern("a.");
    notifier.pattern_edited();
    drop(notifier);

    let session = task.await.unwrap();
    assert_eq!(session.spans().len(), 3);
    assert_eq!(surface.last_highlights(), vec!["ar", "an", "al"]);
}

#[tokio::test]
async fn test_burst_of_edits_is_coalesced() {
    let surface = RecordingSurface::new("", "paranormal");
    let (notifier, queues) = coordinator::channel();

    // Typed one character at a time; the task has not run yet
    let mut typed = String::new();
    for ch in "a.".chars() {
        typed.push(ch);
        surface.set_pattern(&typed);
        notifier.pattern_edited();
    }
    for _ in 0..50 {
        notifier.pattern_edited();
    }
    drop(notifier);

    let session = tokio::spawn(Coordinator::new(surface.clone()).run(queues))
        .await
        .unwrap();

    let stats = session.stats();
    // One initial pass plus one pass for the whole burst
    assert_eq!(stats.pattern_passes, 2);
    assert_eq!(stats.coalesced, 51);
    assert_eq!(surface.last_highlights(), vec!["ar", "an", "al"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_producers_eventually_render_last_state() {
    let surface = RecordingSurface::new("n", "");
    let (notifier, queues) = coordinator::channel();
    let task = tokio::spawn(Coordinator::new(surface.clone()).run(queues));

    let producers: Vec<_> = (0..8)
        .map(|i| {
            let notifier = notifier.clone();
            let surface = surface.clone();
            tokio::spawn(async move {
                if i == 0 {
                    surface.set_sample("banana");
                }
                notifier.sample_edited();
            })
        })
        .collect();
    for producer in producers {
        producer.await.unwrap();
    }

    // Last word after every producer finished
    notifier.sample_edited();
    drop(notifier);
    task.await.unwrap();

    assert_eq!(surface.last_render_text(), "banana");
    assert_eq!(surface.last_highlights(), vec!["n", "n"]);
}

// ========================================================================
// Trace sink
// ========================================================================

fn capture_pattern_edits(log: &CapturedLog) -> tracing::subscriber::DefaultGuard {
    let layer = regex_live::tracing::debug_layer(log.clone());
    tracing::subscriber::set_default(tracing_subscriber::registry().with(layer))
}

#[tokio::test]
async fn test_trace_sink_gets_one_line_per_pattern_edit() {
    let log = CapturedLog::default();
    let _guard = capture_pattern_edits(&log);

    let surface = RecordingSurface::new("", "paranormal");
    let (notifier, queues) = coordinator::channel();

    let mut typed = String::new();
    for ch in "a.b".chars() {
        typed.push(ch);
        surface.set_pattern(&typed);
        notifier.pattern_edited();
    }
    notifier.sample_edited();
    notifier.sample_edited();
    drop(notifier);

    // Run on this thread so the scoped subscriber sees every event
    let session = Coordinator::new(surface.clone()).run(queues).await;

    // The burst was coalesced into one pass but every edit is traced
    assert_eq!(session.stats().pattern_passes, 2);
    let lines = log.lines();
    assert_eq!(lines.len(), 3, "got: {:?}", lines);
    assert!(lines.iter().all(|line| line.contains("pattern=a.b")));
}

#[tokio::test]
async fn test_trace_sink_gets_one_line_per_flag_toggle() {
    let log = CapturedLog::default();
    let _guard = capture_pattern_edits(&log);

    let surface = RecordingSurface::new("abc", "ABC");
    let (notifier, queues) = coordinator::channel();
    surface.toggle(Flag::CaseInsensitive);
    notifier.flags_toggled();
    drop(notifier);

    Coordinator::new(surface.clone()).run(queues).await;

    // The initial pass is not an edit; the toggle's PatternEdited is
    assert_eq!(log.lines().len(), 1, "got: {:?}", log.lines());
    assert_eq!(surface.last_highlights(), vec!["ABC"]);
}
