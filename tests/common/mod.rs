//! Shared helpers for running the freestanding programs

#![allow(dead_code)]

use std::env;
use std::process::{Command, ExitStatus, Output, Stdio};

/// Environment variable selecting the scenario a re-executed child runs
pub const SCENARIO_ENV: &str = "ZEROSTART_EXIT_SCENARIO";

/// Run a program the way a bare loader would: no arguments, empty
/// environment, no standard input
pub fn run_bare(program: &str) -> Output {
    run_with_args(program, &[])
}

/// Run a program with arguments but otherwise bare
pub fn run_with_args(program: &str, args: &[&str]) -> Output {
    Command::new(program)
        .args(args)
        .env_clear()
        .stdin(Stdio::null())
        .output()
        .unwrap_or_else(|e| panic!("failed to run {program}: {e}"))
}

/// Check a program's streams against the build's trace setting
///
/// Stdout is always empty. Stderr is empty unless the crate was built with
/// `exit_trace`, in which case every line carries the `[zerostart]` tag.
pub fn assert_output_matches_trace_setting(output: &Output) {
    assert!(output.stdout.is_empty(), "stdout: {:?}", output.stdout);

    let stderr = String::from_utf8_lossy(&output.stderr);
    if zerostart::io::TRACE_ENABLED {
        assert!(!stderr.is_empty(), "traced build wrote nothing");
        assert!(stderr.lines().all(|line| line.starts_with("[zerostart]")), "{stderr}");
    } else {
        assert!(stderr.is_empty(), "stderr: {stderr}");
    }
}

/// Exit status of `scenario` run in a fresh copy of this test binary
///
/// The exit paths terminate their process, so they cannot run inside the
/// test harness directly. The parent re-executes the current test binary
/// filtered to `test_name`, with [`SCENARIO_ENV`] set; in the child the
/// same test calls this again and runs `scenario`, which must terminate the
/// process instead of returning.
pub fn exit_status_of(test_name: &str, scenario: impl FnOnce()) -> ExitStatus {
    if env::var(SCENARIO_ENV).as_deref() == Ok(test_name) {
        scenario();
        unreachable!("scenario {test_name} returned instead of exiting");
    }

    let exe = env::current_exe().expect("current test binary");
    let output = Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(SCENARIO_ENV, test_name)
        .stdin(Stdio::null())
        .output()
        .expect("failed to re-execute test binary");

    // A harness that reaches its summary never ran the scenario's exit
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains("test result:"),
        "scenario {test_name} returned to the harness:\n{stdout}"
    );

    output.status
}
