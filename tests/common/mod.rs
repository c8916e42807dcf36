//! Recording collaborators and a stub session shared by the launcher tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use clap::Args;
use testmain::{FloatingPointTraps, FpeError, LogLevel, ProcessLogger, TestSession};

/// One interaction with a collaborator, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SetLevel(LogLevel),
    Info(String),
    EnableFpe,
    DisableFpe,
    SessionRun(StubArgs),
}

pub type Journal = Rc<RefCell<Vec<Event>>>;

/// Logger and FPE stand-in appending every call to a shared journal.
#[derive(Default)]
pub struct Recorder {
    pub journal: Journal,
    pub reject_fpe: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_fpe() -> Self {
        Self {
            reject_fpe: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.journal.borrow().clone()
    }

    pub fn count(&self, wanted: impl Fn(&Event) -> bool) -> usize {
        self.journal.borrow().iter().filter(|event| wanted(event)).count()
    }

    pub fn session(&self, status: i32) -> StubSession {
        StubSession {
            status,
            journal: Rc::clone(&self.journal),
        }
    }
}

impl ProcessLogger for Recorder {
    fn set_level(&self, level: LogLevel) {
        self.journal.borrow_mut().push(Event::SetLevel(level));
    }

    fn info(&self, message: &str) {
        self.journal.borrow_mut().push(Event::Info(message.to_string()));
    }
}

impl FloatingPointTraps for Recorder {
    fn enable(&self) -> Result<(), FpeError> {
        self.journal.borrow_mut().push(Event::EnableFpe);
        if self.reject_fpe {
            return Err(FpeError::Rejected {
                action: "enable",
                mask: 0,
            });
        }
        Ok(())
    }

    fn disable(&self) -> Result<(), FpeError> {
        self.journal.borrow_mut().push(Event::DisableFpe);
        Ok(())
    }
}

/// Arguments of the stub session, standing in for a runner's own options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct StubArgs {
    /// Only run tests whose name contains this string
    pub filter: Option<String>,

    /// Print the test names instead of running them
    #[arg(long)]
    pub list: bool,
}

/// A session that records its arguments and returns a fixed status.
pub struct StubSession {
    pub status: i32,
    pub journal: Journal,
}

impl TestSession for StubSession {
    type Args = StubArgs;

    fn name(&self) -> &str {
        "stub"
    }

    fn about(&self) -> Option<&str> {
        Some("Stub session for launcher tests")
    }

    fn run(self, args: StubArgs) -> i32 {
        self.journal.borrow_mut().push(Event::SessionRun(args));
        self.status
    }
}

pub fn argv<'a>(args: &'a [&'a str]) -> impl Iterator<Item = &'a str> + Clone {
    std::iter::once("stub").chain(args.iter().copied())
}
