//! Program entry
//!
//! [`entry_point!`](crate::entry_point) emits the `_start` symbol the loader
//! jumps to; the two exit paths below are what the programs run from it.
//!
//! Both paths move the process from running to terminated in one linear
//! sequence: no loops, no suspension points, no error states.

use core::hint;

use crate::constants::FIXED_EXIT_STATUS;
use crate::process;
use crate::region::RESERVED_REGION;
use crate::status::ExitStatusCell;

/// Define the process entry symbol `_start`
///
/// The kernel enters `_start` with `rsp` pointing at `argc` and 16-byte
/// aligned, not at a return address. The generated stub clears the frame
/// pointer, re-aligns the stack, and calls `$path`, which must be a
/// `fn() -> !`. Arguments and environment are left untouched.
///
/// The expansion also defines an empty `rust_eh_personality`, so the
/// program links whether or not the active profile aborts on panic.
///
/// Use it exactly once per program, at the crate root of a `#![no_main]`
/// binary.
#[macro_export]
macro_rules! entry_point {
    ($path:path) => {
        #[unsafe(no_mangle)]
        #[unsafe(naked)]
        pub unsafe extern "C" fn _start() -> ! {
            ::core::arch::naked_asm!(
                // 最外フレームの印
                "xor ebp, ebp",
                // スタックを16バイト境界に揃える
                "and rsp, -16",
                "call {entry}",
                "ud2",
                entry = sym __zerostart_entry,
            )
        }

        extern "C" fn __zerostart_entry() -> ! {
            let entry: fn() -> ! = $path;
            entry()
        }

        // `core` is prebuilt with unwind tables that name this symbol.
        // Nothing unwinds here: every panic handler exits the process.
        #[unsafe(no_mangle)]
        extern "C" fn rust_eh_personality() {}
    };
}

/// Fixed-exit path: address the reserved region, then exit with status 0
///
/// The address computation decides nothing. It is kept as an observability
/// hook: the value is live in a register right before the exit system call,
/// where a debugger stopped on `syscall` can read it.
pub fn exit_fixed() -> ! {
    let region = RESERVED_REGION.addr();
    hint::black_box(region);

    crate::trace!(
        "[zerostart] {} build for {}\n",
        crate::constants::BUILD_PROFILE,
        crate::constants::BUILD_TARGET
    );
    crate::trace!(
        "[zerostart] reserved region at {:#x}, {} bytes\n",
        region.as_u64(),
        RESERVED_REGION.len()
    );

    process::exit(FIXED_EXIT_STATUS)
}

/// External-state path: run `mutator`, then exit with the cell's value
///
/// Strictly ordered:
/// 1. `mutator(cell)` runs to completion (synchronously);
/// 2. `cell` is read once;
/// 3. the process terminates with that value.
///
/// A mutator that never writes leaves the cell's initial value as the exit
/// status. A mutator that diverges means the process never terminates here.
/// Only the low 8 bits of the status reach the parent.
pub fn exit_with_state<F>(cell: &ExitStatusCell, mutator: F) -> !
where
    F: FnOnce(&ExitStatusCell),
{
    mutator(cell);
    let status = cell.get();

    crate::trace!("[zerostart] exit status read: {}\n", status);

    process::exit(status)
}
