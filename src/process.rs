//! Process termination
//!
//! [`exit`] is the single "terminate process with status code" interface.
//! Nothing else in the crate issues a terminating system call.

use crate::constants::EXIT_STATUS_MASK;
use crate::syscall;

/// Exit the current process with the given exit code
///
/// Issues `exit_group` directly: no runtime exit routine, no cleanup
/// handlers, no destructors. Every thread of the process ends. Static
/// storage (including [`crate::RESERVED_REGION`]) is reclaimed by the kernel.
///
/// This function never returns. If the kernel were to reject the call the
/// behavior is undefined; there is no retry and no fallback.
pub fn exit(code: i32) -> ! {
    crate::trace!("[zerostart] exit_group({})\n", code);
    syscall::exit_group(code)
}

/// The exit status a parent observes for `code`
///
/// The kernel truncates the status to its low 8 bits, so `256` is seen as
/// `0` and `-1` as `255`.
///
/// # Examples
/// ```
/// use zerostart::process::observed_status;
///
/// assert_eq!(observed_status(7), 7);
/// assert_eq!(observed_status(256), 0);
/// assert_eq!(observed_status(-1), 255);
/// ```
#[must_use]
pub const fn observed_status(code: i32) -> u8 {
    (code & EXIT_STATUS_MASK) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_status_keeps_low_byte() {
        assert_eq!(observed_status(0), 0);
        assert_eq!(observed_status(1), 1);
        assert_eq!(observed_status(255), 255);
        assert_eq!(observed_status(256), 0);
        assert_eq!(observed_status(257), 1);
        assert_eq!(observed_status(-1), 255);
        assert_eq!(observed_status(i32::MIN), 0);
    }
}
