// Regression tests for the `testmain` binary's command line.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

const FPE_LINE: &str = "Enabling floating point exceptions";

fn testmain() -> Command {
    let mut cmd = Command::cargo_bin("testmain").unwrap();
    cmd.env_remove("TESTMAIN_LOG_LEVEL");
    cmd
}

#[test]
fn help_lists_launcher_and_runner_options() {
    testmain()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            contains("--log-level")
                .and(contains("--enable-fpe"))
                .and(contains("--include-ignored"))
                .and(contains("testmain"))
                .and(contains("Floating point smoke tests run through the testmain launcher")),
        );
}

#[test]
fn unknown_option_is_a_usage_error() {
    testmain()
        .arg("--frobnicate")
        .assert()
        .code(2)
        .stderr(contains("--frobnicate"));
}

#[test]
fn smoke_suite_passes() {
    testmain()
        .args(["--test-threads", "1"])
        .assert()
        .success()
        .stdout(contains("float::finite_arithmetic"));
}

#[test]
fn list_does_not_run_trials() {
    testmain()
        .arg("--list")
        .assert()
        .success()
        .stdout(contains("float::divide_by_zero: test"));
}

#[test]
fn fpe_line_is_logged_at_info_level() {
    testmain()
        .args(["--enable-fpe", "-l", "2", "--list"])
        .assert()
        .success()
        .stderr(contains(FPE_LINE));
}

#[test]
fn fpe_line_is_hidden_at_the_default_level() {
    testmain()
        .args(["--enable-fpe", "--list"])
        .assert()
        .success()
        .stderr(contains(FPE_LINE).not());
}

#[test]
fn negative_level_clamps_to_trace() {
    testmain()
        .args(["--enable-fpe", "-l", "-5", "--list"])
        .assert()
        .success()
        .stderr(contains(FPE_LINE));
}

#[test]
fn oversized_level_clamps_to_off() {
    testmain()
        .args(["--enable-fpe", "-l", "50", "--list"])
        .assert()
        .success()
        .stderr(contains(FPE_LINE).not());
}

#[test]
fn level_can_come_from_the_environment() {
    testmain()
        .env("TESTMAIN_LOG_LEVEL", "2")
        .args(["--enable-fpe", "--list"])
        .assert()
        .success()
        .stderr(contains(FPE_LINE));
}

#[test]
fn division_by_zero_is_silent_without_traps() {
    testmain()
        .args(["--include-ignored", "--exact", "float::divide_by_zero"])
        .assert()
        .success();
}

#[cfg(all(target_os = "linux", target_env = "gnu", target_arch = "x86_64"))]
#[test]
fn division_by_zero_traps_with_fpe_enabled() {
    testmain()
        .args([
            "--enable-fpe",
            "--include-ignored",
            "--exact",
            "float::divide_by_zero",
        ])
        .assert()
        .failure();
}
