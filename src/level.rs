//! Log severity levels accepted on the command line.
//!
//! Levels are numbered the way the `-l/--log-level` option reads them:
//! `0 = trace` up to `6 = off`. Any integer is accepted and clamped into that
//! range, so `-l -5` means trace and `-l 50` means off.

use std::fmt;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

/// Severity threshold of the process-wide logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    #[default]
    Warn = 3,
    Error = 4,
    Critical = 5,
    Off = 6,
}

impl LogLevel {
    /// Every level, ordered by its numeric value.
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Off,
    ];

    pub const MIN: i64 = LogLevel::Trace as i64;
    pub const MAX: i64 = LogLevel::Off as i64;

    /// Converts any integer into a level, clamping it into `[MIN, MAX]`.
    pub fn clamped(value: i64) -> Self {
        let index = value.clamp(Self::MIN, Self::MAX);
        Self::ALL[index as usize]
    }

    /// Returns the level for an in-range number, `None` otherwise.
    pub fn from_index(value: i64) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    pub fn as_index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Off => "off",
        }
    }

    /// The `tracing` filter enforcing this threshold.
    ///
    /// `tracing` has no level above `ERROR`, so `Critical` filters like `Error`.
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.to_filter()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a level name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    /// Accepts level names (`warn` and `warning` both work) or numbers,
    /// numbers being clamped like the command-line option.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(number) = s.trim().parse::<i64>() {
            return Ok(Self::clamped(number));
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "err" | "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            "off" => Ok(LogLevel::Off),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}
