//! The test launcher.
//!
//! Launching is a linear sequence: parse the command line, clamp and apply the
//! log level, optionally enable floating-point traps, then run the session and
//! return its status. The only early exit is a command line that clap rejects
//! or answers by itself (`--help`), in which case clap's status is returned
//! and the session never runs.

use std::ffi::OsString;

use clap::{Args, Command, FromArgMatches};

use crate::cli::args::LauncherArgs;
use crate::fpe::{FloatingPointTraps, SystemFpe};
use crate::level::LogLevel;
use crate::logger::{ProcessLogger, SystemLogger};
use crate::session::TestSession;

/// Logged right before floating-point traps are enabled.
pub const ENABLE_FPE_MESSAGE: &str = "Enabling floating point exceptions";

/// clap's default layout with the session name on the first line.
const HELP_TEMPLATE: &str =
    "{before-help}{name}\n{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}";

static SYSTEM_FPE: SystemFpe = SystemFpe;
static SYSTEM_LOGGER: SystemLogger = SystemLogger;

/// Configures the process through its collaborators and runs test sessions.
pub struct Launcher<'a> {
    logger: &'a dyn ProcessLogger,
    traps: &'a dyn FloatingPointTraps,
}

impl Launcher<'static> {
    /// A launcher wired to the process-wide logger and the platform FPE state.
    ///
    /// The logger is only installed once the command line has been accepted.
    pub fn system() -> Self {
        Self::new(&SYSTEM_LOGGER, &SYSTEM_FPE)
    }
}

impl<'a> Launcher<'a> {
    pub fn new(logger: &'a dyn ProcessLogger, traps: &'a dyn FloatingPointTraps) -> Self {
        Self { logger, traps }
    }

    /// Builds the combined command line: the launcher options followed by the
    /// session's own arguments.
    ///
    /// Derived `Args` groups overwrite the about text with their doc comments
    /// and may install their own help template, so both are set last.
    pub fn command<S: TestSession>(session: &S) -> Command {
        let command = Command::new(session.name().to_string());
        let command = LauncherArgs::augment_args(command);
        let command = S::Args::augment_args(command)
            .help_template(HELP_TEMPLATE)
            .long_about(None::<&'static str>);
        match session.about() {
            Some(about) => command.about(about.to_string()),
            None => command.about(None::<&'static str>),
        }
    }

    /// Parses `argv` (program name first) into launcher and session arguments.
    pub fn parse<S, I, T>(session: &S, argv: I) -> Result<(LauncherArgs, S::Args), clap::Error>
    where
        S: TestSession,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::command(session);
        let matches = command.try_get_matches_from_mut(argv)?;
        let launcher =
            LauncherArgs::from_arg_matches(&matches).map_err(|e| e.format(&mut command))?;
        let session_args =
            S::Args::from_arg_matches(&matches).map_err(|e| e.format(&mut command))?;
        Ok((launcher, session_args))
    }

    /// Applies the parsed options to the process and returns the level that
    /// was set.
    pub fn configure(&self, args: &LauncherArgs) -> LogLevel {
        let level = args.level();
        self.logger.set_level(level);

        if args.enable_fpe {
            self.logger.info(ENABLE_FPE_MESSAGE);
            if let Err(error) = self.traps.enable() {
                eprintln!("{:?}", miette::Report::new(error));
            }
        }

        level
    }

    /// Parses `argv`, configures the process and runs `session`, returning
    /// the status the process should exit with.
    pub fn launch<S, I, T>(&self, session: S, argv: I) -> i32
    where
        S: TestSession,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let (args, session_args) = match Self::parse(&session, argv) {
            Ok(parsed) => parsed,
            Err(error) => {
                // Help and version requests print to stdout, errors to stderr.
                let _ = error.print();
                return error.exit_code();
            }
        };

        self.configure(&args);
        session.run(session_args)
    }
}
