//! Low-level system call interface
//!
//! Direct wrappers around the Linux x86_64 `syscall` instruction. Only the
//! calls the programs need are exposed; [`crate::process`] and [`crate::io`]
//! build on them.

use core::arch::asm;
use core::fmt;

/// System call number for write operation
pub const SYS_WRITE: u64 = 1;
/// System call number for exit_group (terminates every thread of the process)
pub const SYS_EXIT_GROUP: u64 = 231;

/// Largest errno the kernel returns (as `-errno`)
const MAX_ERRNO: i64 = 4095;

/// System call error codes (Linux)
pub mod errno {
    /// Operation not permitted
    pub const EPERM: i64 = -1;
    /// Interrupted system call
    pub const EINTR: i64 = -4;
    /// I/O error
    pub const EIO: i64 = -5;
    /// Bad file descriptor
    pub const EBADF: i64 = -9;
    /// Try again / Would block
    pub const EAGAIN: i64 = -11;
    /// Bad address
    pub const EFAULT: i64 = -14;
    /// Invalid argument
    pub const EINVAL: i64 = -22;
    /// No space left on device
    pub const ENOSPC: i64 = -28;
    /// Broken pipe
    pub const EPIPE: i64 = -32;
    /// Function not implemented
    pub const ENOSYS: i64 = -38;
}

/// System call result type
pub type SyscallResult<T> = Result<T, SyscallError>;

/// System call error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallError {
    code: i64,
}

impl SyscallError {
    /// Create a new syscall error from a (negative) error code
    #[must_use]
    pub const fn new(code: i64) -> Self {
        Self { code }
    }

    /// Get the error code
    #[must_use]
    pub const fn code(self) -> i64 {
        self.code
    }

    /// Check if this is a specific error
    #[must_use]
    pub const fn is(self, errno: i64) -> bool {
        self.code == errno
    }

    /// Get a human-readable description of the error
    #[must_use]
    #[allow(clippy::wildcard_imports)]
    pub const fn description(self) -> &'static str {
        use errno::*;
        match self.code {
            EPERM => "Operation not permitted",
            EINTR => "Interrupted system call",
            EIO => "I/O error",
            EBADF => "Bad file descriptor",
            EAGAIN => "Resource temporarily unavailable",
            EFAULT => "Bad address",
            EINVAL => "Invalid argument",
            ENOSPC => "No space left on device",
            EPIPE => "Broken pipe",
            ENOSYS => "Function not implemented",
            _ => "Unknown error",
        }
    }
}

impl fmt::Display for SyscallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (errno {})", self.description(), -self.code)
    }
}

/// Decode a raw return value
///
/// The kernel reports failure as `-errno` in `-4095..=-1`; everything else
/// is a successful result.
#[inline]
pub const fn decode(ret: i64) -> SyscallResult<u64> {
    if ret < 0 && ret >= -MAX_ERRNO {
        Err(SyscallError::new(ret))
    } else {
        Ok(ret as u64)
    }
}

/// Perform a system call with up to 3 arguments
///
/// # Safety
/// The caller must ensure that the arguments are valid for the given
/// syscall number (pointers in particular).
#[inline(always)]
pub unsafe fn syscall3(num: u64, arg1: u64, arg2: u64, arg3: u64) -> i64 {
    let ret: i64;
    unsafe {
        asm!(
            "syscall",
            inlateout("rax") num as i64 => ret,
            in("rdi") arg1,
            in("rsi") arg2,
            in("rdx") arg3,
            // The syscall instruction clobbers these
            lateout("rcx") _,
            lateout("r11") _,
            options(nostack)
        );
    }
    ret
}

/// Perform a system call that does not return
///
/// # Safety
/// `num` must name a call that never returns to the caller on success
/// (`exit`, `exit_group`). If the kernel does return, execution continues
/// at an undefined location.
#[inline(always)]
pub unsafe fn syscall1_noreturn(num: u64, arg1: u64) -> ! {
    unsafe {
        asm!(
            "syscall",
            in("rax") num,
            in("rdi") arg1,
            options(noreturn, nostack)
        );
    }
}

// ============================================================================
// System Call Wrappers
// ============================================================================

/// sys_write - Write to file descriptor
///
/// # Returns
/// Number of bytes written, which may be less than `buf.len()`
///
/// # Errors
/// * `EBADF` - Invalid file descriptor
/// * `EFAULT` - Invalid buffer pointer
/// * `EINTR` - Interrupted before anything was written
/// * `EPIPE` - Broken pipe
pub fn write(fd: u64, buf: &[u8]) -> SyscallResult<usize> {
    // SAFETY: `buf` is a live slice for the duration of the call.
    let ret = unsafe { syscall3(SYS_WRITE, fd, buf.as_ptr() as u64, buf.len() as u64) };
    decode(ret).map(|n| n as usize)
}

/// sys_exit_group - Terminate the process
///
/// Only the low 8 bits of `code` reach the parent.
pub fn exit_group(code: i32) -> ! {
    // SAFETY: exit_group takes one integer and never returns.
    unsafe { syscall1_noreturn(SYS_EXIT_GROUP, code as u64) }
}
