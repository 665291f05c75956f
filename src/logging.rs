//! Logger setup
//!
//! Console messages go to stderr so stdout only carries planned path pairs.
//! An optional log file receives the same records with timestamps.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{Level, LevelFilter};

/// Verbosity level for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Recovered defaults and failures (default)
    Warning,
    /// Also configuration and summary messages
    Info,
    /// Also every resolved pattern and planned pair
    Debug,
    /// Also every path skipped during discovery
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Maps the number of `-v` flags to a level
    pub fn from_occurrences(occurrences: u8) -> Self {
        match occurrences {
            0 => LogLevel::Warning,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Prefix shown before console messages of the given level
fn console_prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "error: ",
        Level::Warn => "warning: ",
        _ => "",
    }
}

/// Console sink, coloured only when stderr is a terminal
fn console_dispatch(colored: bool) -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .format(move |out, message, record| {
            let prefix = console_prefix(record.level());
            if colored {
                out.finish(format_args!(
                    "\x1B[{}m{}{}\x1B[0m",
                    colors.get_color(&record.level()).to_fg_str(),
                    prefix,
                    message
                ))
            } else {
                out.finish(format_args!("{prefix}{message}"))
            }
        })
        .chain(std::io::stderr())
}

/// File sink with RFC 3339 timestamps and the record's module
fn file_dispatch(log_file: &Path) -> Result<Dispatch> {
    let file = fern::log_file(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(file))
}

/// Installs the global logger
///
/// # Errors
/// Returns an error if the log file cannot be opened or a logger is
/// already installed
pub fn init_logger(verbosity: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let mut logger = Dispatch::new()
        .level(verbosity.to_level_filter())
        .chain(console_dispatch(atty::is(atty::Stream::Stderr)));

    if let Some(path) = log_file {
        logger = logger.chain(file_dispatch(path)?);
    }
    logger.apply()?;

    log::debug!("Logger initialized with verbosity level: {verbosity:?}");
    Ok(())
}

/// Pick the coloured variant of a message when stdout is a terminal
pub fn format_message(message: &str, colored_message: &str) -> String {
    if atty::is(atty::Stream::Stdout) {
        colored_message.to_string()
    } else {
        message.to_string()
    }
}
