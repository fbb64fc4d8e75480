//! Routes the driver's log macros to stderr.

use std::fmt;
use std::io::Write;

use hidcon_core::log::{self, LogLevel};

fn print_stderr(args: fmt::Arguments<'_>) {
    let _ = std::io::stderr().write_fmt(args);
}

fn log_stderr(level: LogLevel, args: fmt::Arguments<'_>) {
    let _ = writeln!(std::io::stderr(), "[{}] {}", level.name(), args);
}

/// Installs the stderr sinks and sets the level filter.
pub fn init(level: LogLevel) {
    // SAFETY: both functions only write to stderr, which is safe from any
    // thread; the replay has no interrupt context.
    unsafe {
        log::set_print_fn(print_stderr);
        log::set_log_fn(log_stderr);
    }
    log::set_max_level(level);
}

/// Parses a `--log-level` value.
///
/// # Errors
///
/// Returns a message listing the accepted names.
pub fn parse_level(name: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(&name.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown log level `{name}` (fatal, error, warn, info, debug, trace)"))
}
