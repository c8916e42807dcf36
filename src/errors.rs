//! Testmain error types.
//!
//! Command-line failures stay `clap::Error` so that clap keeps control of the
//! message and the exit status. Everything else that can go wrong while
//! preparing the process is described here as a miette diagnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Failure to change the floating-point exception traps of the current thread.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum FpeError {
    #[error("floating point exceptions cannot be trapped on {os}/{arch}")]
    #[diagnostic(
        code(testmain::fpe::unsupported),
        help("trapping is available on Linux with glibc (x86, x86_64, aarch64) and on other x86_64 targets")
    )]
    Unsupported {
        os: &'static str,
        arch: &'static str,
    },

    #[error("the C library refused to {action} floating point traps (mask {mask:#x})")]
    #[diagnostic(
        code(testmain::fpe::rejected),
        help("the processor may not support trapping these exceptions")
    )]
    Rejected { action: &'static str, mask: i32 },
}

impl FpeError {
    pub fn unsupported() -> Self {
        FpeError::Unsupported {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}
