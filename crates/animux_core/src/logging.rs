//! Logging infrastructure.
//!
//! The crate itself only emits `tracing` events (command compilation at
//! debug level, font/subtitle summaries at info, missing backends at warn).
//! Callers embedding the crate can bring their own subscriber or use the
//! helper here.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level for subscriber initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Initialize a global tracing subscriber.
///
/// Respects `RUST_LOG`, falling back to the provided default level, and
/// writes to stderr. Call once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Warn), "warn");
    }
}
