//! Logging setup
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=regex_live::coordinator=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/regex-live/logs/regex-live.log` with daily
//! rotation. There is no console layer: the terminal belongs to the UI.
//!
//! With `--debug`, every pattern edit is also appended to `./debug.log`
//! (target [`PATTERN_EDITS_TARGET`]).

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::coordinator::PATTERN_EDITS_TARGET;

/// Keeps background log writers alive; drop at the very end of `main`
#[must_use]
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Open the trace sink in append mode, creating it if needed
pub fn open_debug_sink(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the tracing subscriber
///
/// File logging respects RUST_LOG (default `info`). If the logs directory
/// cannot be created, file logging is skipped with a warning on stderr.
pub fn init(debug_sink: Option<File>) -> LogGuards {
    let mut guards = Vec::new();

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            let file_appender = tracing_appender::rolling::daily(logs_dir, "regex-live.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(filter),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    let trace_layer = debug_sink.map(|file| {
        let (writer, guard) = tracing_appender::non_blocking(file);
        guards.push(guard);
        debug_layer(writer)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(trace_layer)
        .init();

    LogGuards { _guards: guards }
}

/// Layer that writes only `pattern_edits` events, one line each
pub fn debug_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(EnvFilter::new(format!("{}=debug", PATTERN_EDITS_TARGET)))
}
