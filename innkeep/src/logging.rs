//! The stderr backend for the `log` facade.
//!
//! Library code only ever calls `log::error!`, `log::warn!` and friends.
//! Binaries pick a [`LogLevel`] (usually via [`init_logger`]) and install the
//! resulting [`Logger`] once at startup. Nothing is printed before that.

use std::env;
use std::fmt;
use std::str::FromStr;

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

use crate::error::Error;

/// Environment variable read by [`init_logger`] when neither flag is given.
pub const LOG_MODE_ENV: &str = "INNKEEP_LOG_MODE";

/// How chatty the process is.
///
/// ```
/// use innkeep::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert_eq!("Verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Nothing at all, not even failed saves.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything down to debug, tagged with the emitting module.
    Verbose,
}

impl LogLevel {
    /// The `log` filter installed for this level.
    #[must_use]
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
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
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(Error::Validation {
                field: LOG_MODE_ENV.to_string(),
                message: format!("expected quiet, normal or verbose, got '{s}'"),
            }),
        }
    }
}

/// Writes enabled records to stderr as `LEVEL: message`.
///
/// At [`LogLevel::Verbose`] the record's target is included, e.g.
/// `DEBUG [innkeep::store::local]: Loaded 3 reservation(s)`.
#[derive(Debug, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// A logger at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Makes this the process-wide `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if a backend is already installed.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let filter = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }

    fn render(&self, record: &Record<'_>) -> String {
        let tag = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug | Level::Trace => "DEBUG",
        };
        if self.level == LogLevel::Verbose {
            format!("{tag} [{}]: {}", record.target(), record.args())
        } else {
            format!("{tag}: {}", record.args())
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.to_level_filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.render(record));
        }
    }

    fn flush(&self) {}
}

/// Picks the level from the CLI flags, falling back to [`LOG_MODE_ENV`].
///
/// `verbose` wins over `quiet`. An unparseable environment value is
/// ignored.
///
/// ```
/// use innkeep::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = if verbose {
        LogLevel::Verbose
    } else if quiet {
        LogLevel::Quiet
    } else {
        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    };
    Logger::new(level)
}
