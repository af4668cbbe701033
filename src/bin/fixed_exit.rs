//! Fixed-exit program
//!
//! Computes the address of the reserved zero region, then terminates with
//! status 0 through a raw `exit_group`. No arguments, no environment, no
//! output.

#![no_std]
#![no_main]

use core::panic::PanicInfo;

zerostart::entry_point!(start);

fn start() -> ! {
    zerostart::exit_fixed()
}

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    zerostart::process::exit(zerostart::PANIC_STATUS)
}
