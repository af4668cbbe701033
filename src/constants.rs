// src/constants.rs

//! Layout and exit-status constants
//!
//! The region layout and the collaborator values come from `zerostart.json`
//! through `build.rs`; the rest are fixed by the programs' contracts.

include!(concat!(env!("OUT_DIR"), "/layout.rs"));

/// Size of the reserved zero region in bytes
pub const RESERVED_BYTES: usize = RESERVED_WORDS * WORD_SIZE;

/// Status `fixed_exit` terminates with, unconditionally
pub const FIXED_EXIT_STATUS: i32 = 0;

/// Status the freestanding programs' panic handlers terminate with
pub const PANIC_STATUS: i32 = 101;

/// Bits of an exit status a parent process can observe
///
/// Linux keeps the low byte of the value passed to `exit_group`.
pub const EXIT_STATUS_MASK: i32 = 0xff;

/// Cargo profile the crate was built with (from `build.rs`)
pub const BUILD_PROFILE: &str = env!("BUILD_PROFILE");

/// Target triple the crate was built for (from `build.rs`)
pub const BUILD_TARGET: &str = env!("BUILD_TARGET");

const _: () = assert!(WORD_SIZE == core::mem::size_of::<u64>());
const _: () = assert!(RESERVED_WORDS > 0);
