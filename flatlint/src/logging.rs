//! Diagnostics output.
//!
//! Library code only emits through the `log` facade (`log::debug!` for
//! resolution steps, `log::info!` for CLI progress). [`Logger`] is the
//! stderr backend the `flatlint` binary installs; embedders are free to
//! install any other `log` implementation instead.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Environment variable consulted when no CLI verbosity flag is given.
pub const LOG_MODE_ENV: &str = "FLATLINT_LOG_MODE";

/// How much diagnostic output reaches stderr.
///
/// Ordered from least to most verbose.
///
/// ```
/// use flatlint::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Verbose);
/// assert_eq!("VERBOSE".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
/// assert!("chatty".parse::<LogLevel>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing but the CLI's own error line.
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Everything down to per-step resolution traces.
    Verbose,
}

impl LogLevel {
    /// Level selected by the `--verbose`/`--quiet` flags, if either is set.
    /// `verbose` wins when both are.
    #[must_use]
    pub const fn from_flags(verbose: bool, quiet: bool) -> Option<Self> {
        if verbose {
            Some(Self::Verbose)
        } else if quiet {
            Some(Self::Quiet)
        } else {
            None
        }
    }

    /// The most verbose `log` level let through.
    #[must_use]
    pub const fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        })
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(Error::validation(
                LOG_MODE_ENV,
                format!("unknown log mode '{s}' (expected quiet, normal or verbose)"),
            )),
        }
    }
}

/// Stderr `log` backend.
///
/// Lines look like `flatlint: warning: message`. At [`LogLevel::Verbose`]
/// debug lines also carry the emitting module.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Logger at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Install as the process-wide `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if another backend is already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_max_level(self.level.level_filter());
        log::set_boxed_logger(Box::new(self))
    }

    fn render(record: &log::Record<'_>) -> String {
        match record.level() {
            log::Level::Error => format!("flatlint: error: {}", record.args()),
            log::Level::Warn => format!("flatlint: warning: {}", record.args()),
            log::Level::Info => format!("flatlint: {}", record.args()),
            log::Level::Debug | log::Level::Trace => {
                format!("flatlint: [{}] {}", record.target(), record.args())
            }
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.level_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::render(record));
        }
    }

    fn flush(&self) {}
}

/// Pick the logger for a CLI run.
///
/// Flags win; otherwise `FLATLINT_LOG_MODE` is used when it parses, and
/// [`LogLevel::Normal`] when it is unset or unrecognized.
///
/// ```
/// use flatlint::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = LogLevel::from_flags(verbose, quiet)
        .or_else(|| env::var(LOG_MODE_ENV).ok()?.parse().ok())
        .unwrap_or_default();
    Logger::new(level)
}
