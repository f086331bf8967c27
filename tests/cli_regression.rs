//! Black-box runs of the selfcheck binary: exit codes, filtering flags, and
//! log-category gating as seen by a shell user.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn selfcheck() -> Command {
    Command::cargo_bin("selfcheck").expect("binary builds")
}

#[test]
fn full_run_succeeds_and_prints_the_report() {
    selfcheck()
        .assert()
        .success()
        .stdout(contains("TEST RESULTS"))
        .stdout(contains("TOTAL: Passed:"))
        .stdout(contains("Failed: 0"));
}

#[test]
fn only_result_logs_suppresses_per_test_output() {
    selfcheck()
        .arg("--only-result-logs")
        .assert()
        .success()
        .stdout(contains("Test: \"").not())
        .stdout(contains("Running tests for").not())
        .stdout(contains("TOTAL: Passed:"));
}

#[test]
fn positional_filters_run_only_the_named_suites() {
    selfcheck()
        .arg("spy")
        .assert()
        .success()
        .stdout(contains("spy recorder"))
        .stdout(contains("assertion engine").not())
        .stdout(contains("file-discovered fixtures").not());
}

#[test]
fn missing_fixture_files_abort_the_suite_and_fail_the_run() {
    let scratch = tempfile::tempdir().expect("tempdir");
    selfcheck()
        .arg("ledger")
        .arg("--fixture-root")
        .arg(scratch.path())
        .assert()
        .failure()
        .stdout(contains("aborted"))
        .stdout(contains("chain_height does not exist as a fixture!"));
}

#[test]
fn no_result_logs_drops_the_report_but_still_signals_failure() {
    let scratch = tempfile::tempdir().expect("tempdir");
    selfcheck()
        .arg("ledger")
        .arg("--fixture-root")
        .arg(scratch.path())
        .arg("--no-result-logs")
        .assert()
        .failure()
        .stdout(contains("TOTAL").not())
        .stdout(contains("aborted"));
}
