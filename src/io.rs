//! Diagnostic output
//!
//! The freestanding programs have no standard I/O. With the `exit_trace`
//! feature, [`trace!`](crate::trace) formats into stderr through the raw
//! `write` system call; without it the macro expands to nothing and the
//! programs never write to any stream.

use crate::syscall::{self, errno, SyscallResult};

use core::fmt;

/// Standard error file descriptor
pub const STDERR: u64 = 2;

/// Whether this build carries trace output
pub const TRACE_ENABLED: bool = cfg!(feature = "exit_trace");

/// Write the whole buffer to a file descriptor
///
/// Retries on short writes and `EINTR`.
///
/// # Errors
/// The first error other than `EINTR` reported by the kernel.
pub fn write_all(fd: u64, mut buf: &[u8]) -> SyscallResult<()> {
    while !buf.is_empty() {
        match syscall::write(fd, buf) {
            Ok(0) => return Err(syscall::SyscallError::new(errno::EIO)),
            Ok(n) => buf = &buf[n..],
            Err(e) if e.is(errno::EINTR) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Stderr writer for fmt::Write
pub struct Stderr;

impl fmt::Write for Stderr {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_all(STDERR, s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Internal trace function for macros
///
/// Write failures are dropped: diagnostics never change the exit status.
#[doc(hidden)]
pub fn _trace(args: fmt::Arguments) {
    use core::fmt::Write;
    let _ = Stderr.write_fmt(args);
}

/// Macro for diagnostic output on stderr (`exit_trace` builds)
#[cfg(feature = "exit_trace")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => ($crate::io::_trace(format_args!($($arg)*)));
}

/// Macro for diagnostic output on stderr (disabled in this build)
#[cfg(not(feature = "exit_trace"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}
