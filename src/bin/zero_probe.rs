//! Zero-region probe program
//!
//! Exits with status 0 when the reserved region reads as zero and lies in
//! the linker's zero-fill range; see `zerostart::probe::ProbeReport` for
//! the failure bits.

#![no_std]
#![no_main]

use core::panic::PanicInfo;

zerostart::entry_point!(start);

fn start() -> ! {
    zerostart::probe::exit_with_probe()
}

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    zerostart::process::exit(zerostart::PANIC_STATUS)
}
