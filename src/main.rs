use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use regex_live::cli::CliArgs;
use regex_live::config_paths::DEBUG_LOG_FILE;
use regex_live::coordinator::{self, Coordinator};
use regex_live::TesterConfig;

mod runtime;
mod view;

use runtime::{App, TerminalSession, TerminalSurface};

fn main() -> Result<()> {
    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    // Only fatal when --debug was asked for
    let debug_sink = if startup.debug {
        let file = regex_live::tracing::open_debug_sink(Path::new(DEBUG_LOG_FILE))
            .with_context(|| format!("Failed to open {}", DEBUG_LOG_FILE))?;
        Some(file)
    } else {
        None
    };
    let _log_guards = regex_live::tracing::init(debug_sink);

    let config = TesterConfig::load();
    let flags = startup.flags.unwrap_or_else(|| config.initial_flags());
    let theme = config.theme();

    let mut terminal = TerminalSession::new().context("Failed to initialize terminal")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("coordinator")
        .build()
        .context("Failed to start coordinator runtime")?;

    let surface = TerminalSurface::new(&startup.sample, flags);
    let (notifier, queues) = coordinator::channel();
    let coordinator_task = runtime.spawn(Coordinator::new(surface.clone()).run(queues));

    tracing::info!(flags = %flags, "Session started");
    let mut app = App::new(&startup.sample, flags, notifier, surface);
    let result = app.run(&mut terminal, &theme);

    drop(terminal);
    let pattern = app.pattern_source();

    // Dropping the app drops the last notifier, which ends the coordinator loop
    drop(app);
    match runtime.block_on(coordinator_task) {
        Ok(session) => tracing::info!(stats = ?session.stats(), "Session ended"),
        Err(e) => tracing::error!("Coordinator task failed: {}", e),
    }

    result?;

    let mut stdout = io::stdout();
    write!(stdout, "{}", pattern)?;
    stdout.flush()?;
    Ok(())
}
