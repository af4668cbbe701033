//! C exit-status collaborator
//!
//! `collab/change_number.c` is compiled by `build.rs` into a static archive
//! linked with this crate. It receives the status integer by pointer and
//! writes [`COLLABORATOR_STATUS`](crate::constants::COLLABORATOR_STATUS)
//! into it.

use crate::status::ExitStatusCell;

unsafe extern "C" {
    fn change_number(number: *mut i32);
}

/// Run the C collaborator on `cell`
///
/// Returns once the foreign write has completed.
pub fn run(cell: &ExitStatusCell) {
    crate::trace!("[zerostart] collaborator: change_number\n");
    // SAFETY: `change_number` writes one `int` through the pointer it is
    // given and keeps no reference to it; the cell outlives the call.
    unsafe { change_number(cell.as_ptr()) }
}
