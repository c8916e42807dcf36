//! Test sessions the launcher can hand control to.
//!
//! A session contributes its own command-line arguments through a
//! [`clap::Args`] type; the launcher merges them with its own options and
//! gives the parsed value back to [`TestSession::run`].

use clap::Args;
use libtest_mimic::{Arguments, Trial};

/// Exit status of a session in which at least one trial failed, as libtest
/// reports it.
pub const FAILURE_STATUS: i32 = 101;

/// A delegated test runner.
pub trait TestSession {
    /// Command-line arguments understood by the runner.
    type Args: Args;

    /// Program name shown in usage and help output.
    fn name(&self) -> &str;

    fn about(&self) -> Option<&str> {
        None
    }

    /// Runs the session and returns its exit status.
    fn run(self, args: Self::Args) -> i32;
}

/// A [`TestSession`] over a list of `libtest-mimic` trials.
pub struct MimicSession {
    name: String,
    about: Option<String>,
    trials: Vec<Trial>,
}

impl MimicSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            trials: Vec::new(),
        }
    }

    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn trial(mut self, trial: Trial) -> Self {
        self.trials.push(trial);
        self
    }

    pub fn trials(mut self, trials: impl IntoIterator<Item = Trial>) -> Self {
        self.trials.extend(trials);
        self
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}

impl TestSession for MimicSession {
    type Args = Arguments;

    fn name(&self) -> &str {
        &self.name
    }

    fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    fn run(self, args: Arguments) -> i32 {
        let conclusion = libtest_mimic::run(&args, self.trials);
        tracing::debug!(
            passed = conclusion.num_passed,
            failed = conclusion.num_failed,
            ignored = conclusion.num_ignored,
            filtered_out = conclusion.num_filtered_out,
            "test session finished"
        );
        if conclusion.has_failed() {
            FAILURE_STATUS
        } else {
            0
        }
    }
}
