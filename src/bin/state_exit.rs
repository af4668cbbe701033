//! External-state exit program
//!
//! Hands the exit-status cell to the C collaborator, then terminates with
//! whatever the collaborator left in it. The cell starts out holding a
//! sentinel so a missing write shows up in the exit status.

#![no_std]
#![no_main]

use core::panic::PanicInfo;

use zerostart::constants::COLLABORATOR_INITIAL_STATUS;
use zerostart::{collaborator, ExitStatusCell};

static EXIT_STATUS: ExitStatusCell = ExitStatusCell::new(COLLABORATOR_INITIAL_STATUS);

zerostart::entry_point!(start);

fn start() -> ! {
    zerostart::exit_with_state(&EXIT_STATUS, collaborator::run)
}

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    zerostart::process::exit(zerostart::PANIC_STATUS)
}
