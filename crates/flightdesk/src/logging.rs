//! Tracing subscriber setup shared by both binaries.

use crate::config::LoggingConfig;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Standard output (server).
    Stdout,
    /// Standard error, keeping stdout free for the interactive menu.
    Stderr,
}

/// Installs the global tracing subscriber.
///
/// An invalid `level` filter falls back to `info`. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(config: &LoggingConfig, output: LogOutput) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
