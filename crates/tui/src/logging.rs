use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Failed service operations are only ever reported here, so the sink has
/// to stay usable while the TUI owns the terminal: with `--log-file` the
/// records go through a non-blocking file appender, otherwise to stderr.
/// The returned guard flushes buffered records when dropped.
pub fn init(filter: Option<String>, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let directive: Directive = filter.unwrap_or_else(|| "warn".to_string()).parse()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file at {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
            Ok(None)
        }
    }
}
