pub use crate::cli::args::LauncherArgs;
pub use crate::errors::FpeError;
pub use crate::fpe::{disable_fpe, enable_fpe, FloatingPointTraps, SystemFpe};
pub use crate::launcher::{Launcher, ENABLE_FPE_MESSAGE};
pub use crate::level::LogLevel;
pub use crate::logger::{logger, Logger, ProcessLogger, SystemLogger};
pub use crate::session::{MimicSession, TestSession, FAILURE_STATUS};

pub mod cli;
pub mod errors;
pub mod fpe;
pub mod launcher;
pub mod level;
pub mod logger;
pub mod session;
