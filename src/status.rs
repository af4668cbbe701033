//! Exit-status cell
//!
//! The integer a collaborator computes and the entry point exits with.
//!
//! # Contract
//!
//! - **Single writer**: the collaborator (the mutator handed to
//!   [`crate::exit_with_state`]) writes the cell, usually once.
//! - **Single reader, after the writer**: the entry point reads it exactly
//!   once, after the mutator has returned, immediately before terminating.
//!
//! Program order already puts the write before the read on one thread.
//! The cell states the edge explicitly as well: [`ExitStatusCell::set`] is a
//! `Release` store and [`ExitStatusCell::get`] an `Acquire` load, so the
//! write is visible to the read even when a collaborator performs it on a
//! thread it joins before returning. Writers going through
//! [`ExitStatusCell::as_ptr`] (foreign code) must finish before the mutator
//! returns.

use core::fmt;
use core::sync::atomic::{AtomicI32, Ordering};

/// Process-wide integer cell holding the pending exit status
#[repr(transparent)]
pub struct ExitStatusCell {
    value: AtomicI32,
}

impl ExitStatusCell {
    /// Create a cell holding `initial`
    #[must_use]
    pub const fn new(initial: i32) -> Self {
        Self {
            value: AtomicI32::new(initial),
        }
    }

    /// Store a new status (writer side)
    pub fn set(&self, status: i32) {
        self.value.store(status, Ordering::Release);
    }

    /// Load the current status (reader side)
    #[must_use]
    pub fn get(&self) -> i32 {
        self.value.load(Ordering::Acquire)
    }

    /// Pointer to the underlying `int`, for foreign collaborators
    ///
    /// Same size and alignment as a C `int` on x86_64 Linux.
    #[must_use]
    pub const fn as_ptr(&self) -> *mut i32 {
        self.value.as_ptr()
    }
}

impl Default for ExitStatusCell {
    /// Zero, the value zero-filled static storage would hold
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for ExitStatusCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExitStatusCell").field(&self.get()).finish()
    }
}
