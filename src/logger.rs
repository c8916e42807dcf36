//! The process-wide logger.
//!
//! [`logger()`] lazily installs a `tracing` subscriber writing to stderr the
//! first time it is called and returns the same [`Logger`] for the rest of the
//! process. The threshold lives behind a `reload` layer so that it can be
//! changed after installation.

use std::sync::atomic::{AtomicU8, Ordering};

use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, Registry};

use crate::level::LogLevel;

/// The logging surface the launcher needs from its environment.
pub trait ProcessLogger {
    /// Sets the severity threshold. Messages below it are dropped.
    fn set_level(&self, level: LogLevel);

    fn info(&self, message: &str);
}

static LOGGER: Lazy<Logger> = Lazy::new(Logger::install);

/// Returns the process-wide logger, installing it on first use.
pub fn logger() -> &'static Logger {
    &LOGGER
}

/// True once [`logger()`] has installed the process-wide logger.
pub fn is_initialized() -> bool {
    Lazy::get(&LOGGER).is_some()
}

/// Forwards to [`logger()`] at call time, so the subscriber is not installed
/// until something is actually logged or configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLogger;

impl ProcessLogger for SystemLogger {
    fn set_level(&self, level: LogLevel) {
        logger().set_level(level);
    }

    fn info(&self, message: &str) {
        logger().info(message);
    }
}

pub struct Logger {
    level: AtomicU8,
    filter: Option<reload::Handle<LevelFilter, Registry>>,
}

impl Logger {
    /// Installs the global subscriber.
    ///
    /// When another global subscriber already exists the logger does not
    /// replace it; it still tracks its own threshold and filters its own
    /// messages against it.
    fn install() -> Self {
        let initial = LogLevel::default();
        let (filter, handle) = reload::Layer::new(initial.to_filter());
        let output = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(atty::is(atty::Stream::Stderr));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(output)
            .try_init()
            .is_ok();

        Self {
            level: AtomicU8::new(initial.as_index()),
            filter: installed.then_some(handle),
        }
    }

    /// A logger that never owns the global subscriber.
    #[cfg(test)]
    pub(crate) fn detached(level: LogLevel) -> Self {
        Self {
            level: AtomicU8::new(level.as_index()),
            filter: None,
        }
    }

    /// True when this logger owns the global `tracing` subscriber.
    pub fn is_installed(&self) -> bool {
        self.filter.is_some()
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::clamped(i64::from(self.level.load(Ordering::Relaxed)))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_index(), Ordering::Relaxed);
        if let Some(handle) = &self.filter {
            // Only fails once the subscriber has been dropped, which a global
            // subscriber never is.
            let _ = handle.reload(level.to_filter());
        }
    }

    /// Whether a message at `level` passes the current threshold.
    pub fn should_log(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.should_log(level) {
            return;
        }
        match level {
            LogLevel::Trace => tracing::trace!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Critical => tracing::error!(critical = true, "{message}"),
            LogLevel::Off => {}
        }
    }

    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }
}

impl ProcessLogger for Logger {
    fn set_level(&self, level: LogLevel) {
        Logger::set_level(self, level);
    }

    fn info(&self, message: &str) {
        Logger::info(self, message);
    }
}
