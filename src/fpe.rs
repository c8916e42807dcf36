//! Floating-point exception trapping.
//!
//! By default IEEE 754 faults are silent: dividing by zero yields an infinity,
//! an invalid operation yields a NaN. Enabling traps turns invalid operations,
//! divisions by zero and overflows into a hardware exception (`SIGFPE` on
//! Unix), which makes numeric bugs fail the test that caused them instead of
//! leaking NaNs into later assertions. Inexact results and underflow stay
//! masked.
//!
//! The trap mask belongs to the calling thread. Threads spawned afterwards
//! inherit it, so traps have to be enabled before the test session starts
//! its workers.

use crate::errors::FpeError;

/// Process collaborator able to toggle floating-point exception traps.
pub trait FloatingPointTraps {
    fn enable(&self) -> Result<(), FpeError>;
    fn disable(&self) -> Result<(), FpeError>;
}

/// Traps backed by the platform floating-point environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFpe;

impl FloatingPointTraps for SystemFpe {
    fn enable(&self) -> Result<(), FpeError> {
        enable_fpe()
    }

    fn disable(&self) -> Result<(), FpeError> {
        disable_fpe()
    }
}

/// Unmasks invalid-operation, division-by-zero and overflow exceptions on the
/// calling thread.
pub fn enable_fpe() -> Result<(), FpeError> {
    imp::enable()
}

/// Masks the exceptions unmasked by [`enable_fpe`] again.
pub fn disable_fpe() -> Result<(), FpeError> {
    imp::disable()
}

/// Reports whether all trapped exceptions are currently unmasked on the
/// calling thread, or `None` when this platform cannot trap them.
pub fn traps_enabled() -> Option<bool> {
    imp::enabled()
}

/// True when [`enable_fpe`] can succeed on this target.
pub fn is_supported() -> bool {
    imp::SUPPORTED
}

// ============================================================================
// glibc: feenableexcept / fedisableexcept
// ============================================================================

#[cfg(all(
    target_os = "linux",
    target_env = "gnu",
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
mod imp {
    use std::ffi::c_int;

    use crate::errors::FpeError;

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    const TRAPPED: c_int = FE_INVALID | FE_DIVBYZERO | FE_OVERFLOW;
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    const FE_INVALID: c_int = 0x01;
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    const FE_DIVBYZERO: c_int = 0x04;
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    const FE_OVERFLOW: c_int = 0x08;

    #[cfg(target_arch = "aarch64")]
    const TRAPPED: c_int = 0x01 | 0x02 | 0x04;

    // glibc extensions, exported by libm.
    extern "C" {
        fn feenableexcept(excepts: c_int) -> c_int;
        fn fedisableexcept(excepts: c_int) -> c_int;
        fn fegetexcept() -> c_int;
    }

    pub(super) const SUPPORTED: bool = true;

    pub(super) fn enable() -> Result<(), FpeError> {
        // SAFETY: only touches the calling thread's floating-point control word.
        let previous = unsafe { feenableexcept(TRAPPED) };
        if previous == -1 {
            return Err(FpeError::Rejected {
                action: "enable",
                mask: TRAPPED,
            });
        }
        Ok(())
    }

    pub(super) fn disable() -> Result<(), FpeError> {
        // SAFETY: see `enable`.
        let previous = unsafe { fedisableexcept(TRAPPED) };
        if previous == -1 {
            return Err(FpeError::Rejected {
                action: "disable",
                mask: TRAPPED,
            });
        }
        Ok(())
    }

    pub(super) fn enabled() -> Option<bool> {
        // SAFETY: read-only query of the calling thread's control word.
        let mask = unsafe { fegetexcept() };
        Some(mask & TRAPPED == TRAPPED)
    }
}

// ============================================================================
// Other x86_64 targets: MXCSR exception mask bits
// ============================================================================

#[cfg(all(
    target_arch = "x86_64",
    not(all(target_os = "linux", target_env = "gnu"))
))]
mod imp {
    use std::arch::asm;

    use crate::errors::FpeError;

    const INVALID_MASK: u32 = 1 << 7;
    const DIVIDE_BY_ZERO_MASK: u32 = 1 << 9;
    const OVERFLOW_MASK: u32 = 1 << 10;
    const TRAPPED: u32 = INVALID_MASK | DIVIDE_BY_ZERO_MASK | OVERFLOW_MASK;

    pub(super) const SUPPORTED: bool = true;

    fn read_mxcsr() -> u32 {
        let mut csr: u32 = 0;
        // SAFETY: stores the SSE control/status register into a local.
        unsafe {
            asm!(
                "stmxcsr [{}]",
                in(reg) std::ptr::addr_of_mut!(csr),
                options(nostack, preserves_flags)
            );
        }
        csr
    }

    fn write_mxcsr(csr: u32) {
        // SAFETY: only the exception mask bits differ from the current value.
        unsafe {
            asm!(
                "ldmxcsr [{}]",
                in(reg) std::ptr::addr_of!(csr),
                options(nostack, readonly, preserves_flags)
            );
        }
    }

    pub(super) fn enable() -> Result<(), FpeError> {
        write_mxcsr(read_mxcsr() & !TRAPPED);
        Ok(())
    }

    pub(super) fn disable() -> Result<(), FpeError> {
        write_mxcsr(read_mxcsr() | TRAPPED);
        Ok(())
    }

    pub(super) fn enabled() -> Option<bool> {
        Some(read_mxcsr() & TRAPPED == 0)
    }
}

// ============================================================================
// Everything else
// ============================================================================

#[cfg(not(any(
    all(
        target_os = "linux",
        target_env = "gnu",
        any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
    ),
    target_arch = "x86_64"
)))]
mod imp {
    use crate::errors::FpeError;

    pub(super) const SUPPORTED: bool = false;

    pub(super) fn enable() -> Result<(), FpeError> {
        Err(FpeError::unsupported())
    }

    pub(super) fn disable() -> Result<(), FpeError> {
        Err(FpeError::unsupported())
    }

    pub(super) fn enabled() -> Option<bool> {
        None
    }
}
