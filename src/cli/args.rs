//! Defines the command-line options the launcher adds to a test session.
//!
//! This module uses the `clap` crate with its "derive" feature. The options
//! are an [`Args`] group rather than a full parser so that they can be merged
//! into the command line of whatever session is being launched.

use clap::Args;

use crate::level::LogLevel;

/// Numeric value of the default log level (warn).
pub const DEFAULT_LOG_LEVEL: i64 = LogLevel::Warn as i64;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_LEVEL_ENV: &str = "TESTMAIN_LOG_LEVEL";

/// Options applied to the process before the session runs.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct LauncherArgs {
    /// Log level, from 0 (trace) to 6 (off); other values are clamped
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        default_value_t = DEFAULT_LOG_LEVEL,
        allow_negative_numbers = true,
        env = LOG_LEVEL_ENV
    )]
    pub log_level: i64,

    /// Enable floating point exceptions
    #[arg(long = "enable-fpe")]
    pub enable_fpe: bool,
}

impl LauncherArgs {
    /// The requested level, clamped into the valid range.
    pub fn level(&self) -> LogLevel {
        LogLevel::clamped(self.log_level)
    }
}

impl Default for LauncherArgs {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            enable_fpe: false,
        }
    }
}
