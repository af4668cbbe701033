//! Tests for the external-state exit path
//!
//! The `state_exit` program is run end to end; the library path is run in a
//! re-executed child of this test binary for each mutator value.

mod common;

use common::{assert_output_matches_trace_setting, exit_status_of, run_bare};
use zerostart::constants::{COLLABORATOR_INITIAL_STATUS, COLLABORATOR_STATUS};
use zerostart::process::observed_status;
use zerostart::{exit_with_state, ExitStatusCell};

const STATE_EXIT: &str = env!("CARGO_BIN_EXE_state_exit");

fn observed_exit_of(test_name: &str, initial: i32, written: Option<i32>) -> Option<i32> {
    exit_status_of(test_name, || {
        let cell = ExitStatusCell::new(initial);
        exit_with_state(&cell, |cell| {
            if let Some(value) = written {
                cell.set(value);
            }
        })
    })
    .code()
}

#[test]
fn program_exits_with_collaborator_status() {
    let output = run_bare(STATE_EXIT);
    assert_eq!(
        output.status.code(),
        Some(i32::from(observed_status(COLLABORATOR_STATUS))),
        "{output:?}"
    );
    assert_ne!(
        output.status.code(),
        Some(i32::from(observed_status(COLLABORATOR_INITIAL_STATUS))),
        "sentinel leaked into the exit status"
    );
}

#[test]
fn program_output_is_limited_to_trace_lines() {
    let output = run_bare(STATE_EXIT);
    assert_eq!(
        output.status.code(),
        Some(i32::from(observed_status(COLLABORATOR_STATUS))),
        "{output:?}"
    );
    assert_output_matches_trace_setting(&output);
}

#[test]
fn mutator_value_0_is_observed() {
    assert_eq!(observed_exit_of("mutator_value_0_is_observed", 42, Some(0)), Some(0));
}

#[test]
fn mutator_value_1_is_observed() {
    assert_eq!(observed_exit_of("mutator_value_1_is_observed", 42, Some(1)), Some(1));
}

#[test]
fn mutator_value_255_is_observed() {
    assert_eq!(observed_exit_of("mutator_value_255_is_observed", 42, Some(255)), Some(255));
}

#[test]
fn mutator_value_256_wraps_to_0() {
    assert_eq!(observed_exit_of("mutator_value_256_wraps_to_0", 42, Some(256)), Some(0));
}

#[test]
fn negative_status_keeps_low_byte() {
    assert_eq!(observed_exit_of("negative_status_keeps_low_byte", 42, Some(-1)), Some(255));
}

#[test]
fn mutator_write_replaces_sentinel() {
    assert_eq!(observed_exit_of("mutator_write_replaces_sentinel", 42, Some(7)), Some(7));
}

#[test]
fn silent_mutator_leaves_initial_value() {
    assert_eq!(observed_exit_of("silent_mutator_leaves_initial_value", 42, None), Some(42));
}

#[test]
fn default_cell_exits_zero_without_write() {
    let status = exit_status_of("default_cell_exits_zero_without_write", || {
        let cell = ExitStatusCell::default();
        exit_with_state(&cell, |_| {})
    });
    assert_eq!(status.code(), Some(0));
}

#[test]
fn write_from_joined_thread_is_observed() {
    let status = exit_status_of("write_from_joined_thread_is_observed", || {
        let cell = ExitStatusCell::new(42);
        exit_with_state(&cell, |cell| {
            std::thread::scope(|scope| {
                scope.spawn(|| cell.set(9));
            });
        })
    });
    assert_eq!(status.code(), Some(9));
}

#[test]
fn c_collaborator_drives_library_path() {
    let status = exit_status_of("c_collaborator_drives_library_path", || {
        let cell = ExitStatusCell::new(COLLABORATOR_INITIAL_STATUS);
        exit_with_state(&cell, zerostart::collaborator::run)
    });
    assert_eq!(status.code(), Some(i32::from(observed_status(COLLABORATOR_STATUS))));
}
