// src/lib.rs
//! zerostart - freestanding x86_64 Linux program fragments
//!
//! Two low-level contracts, packaged for programs that link no runtime:
//!
//! - **Zero-fill static storage**: [`region::ReservedRegion`], a block of
//!   words that reads as zero at start-up and is emitted into `.bss`, so the
//!   executable image does not grow with its size.
//! - **Raw process termination**: [`process::exit`], the one place that
//!   knows the `exit_group` system-call convention.
//!
//! The freestanding programs in `src/bin/` combine them:
//!
//! | program      | behavior                                                     |
//! |--------------|--------------------------------------------------------------|
//! | `fixed_exit` | addresses [`RESERVED_REGION`], exits with status 0            |
//! | `state_exit` | runs the C collaborator on an [`ExitStatusCell`], exits with it |
//! | `zero_probe` | checks [`RESERVED_REGION`] is zero and in `.bss`, reports via status |
//!
//! # Entry
//!
//! Each program declares its `_start` with [`entry_point!`]:
//!
//! ```ignore
//! #![no_std]
//! #![no_main]
//!
//! zerostart::entry_point!(start);
//!
//! fn start() -> ! {
//!     zerostart::exit_fixed()
//! }
//! ```
//!
//! # Diagnostics
//!
//! With the `exit_trace` feature, [`trace!`] writes to stderr through the
//! raw `write` system call. Without it the programs produce no output.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

#[cfg(not(all(target_arch = "x86_64", target_os = "linux")))]
compile_error!("zerostart supports x86_64 Linux only");

pub mod collaborator;
pub mod constants;
pub mod entry;
pub mod io;
pub mod probe;
pub mod process;
pub mod region;
pub mod status;
pub mod syscall;

pub use constants::{FIXED_EXIT_STATUS, PANIC_STATUS};
pub use entry::{exit_fixed, exit_with_state};
pub use region::{ReservedRegion, RESERVED_REGION};
pub use status::ExitStatusCell;
pub use syscall::{SyscallError, SyscallResult};
