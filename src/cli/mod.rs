//! The Testmain command-line entry point.
//!
//! Test executables call [`run`] from their `main` function: it launches the
//! session with the process arguments and exits with the session's status.

use std::process;

use crate::launcher::Launcher;
use crate::session::TestSession;

pub mod args;

/// Launches `session` with the process arguments and exits the process with
/// the resulting status.
pub fn run<S: TestSession>(session: S) -> ! {
    let status = Launcher::system().launch(session, std::env::args_os());
    process::exit(status)
}
