// Regression tests: the binary prints canonical output on stdout and
// renders miette diagnostics on stderr.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn cli_prints_serialized_program() {
    let file = "tests/ok_program.gcl";
    fs::write(file, "x := 1; skip").unwrap();

    let mut cmd = Command::cargo_bin("gcl").unwrap();
    cmd.arg(file);
    cmd.assert()
        .success()
        .stdout(contains(r#""type":"assignment""#).and(contains(r#""type":"skip""#)));

    let _ = fs::remove_file(file);
}

#[test]
fn cli_reports_missing_file() {
    let mut cmd = Command::cargo_bin("gcl").unwrap();
    cmd.arg("tests/no_such_file.gcl");
    cmd.assert().failure().stderr(contains("Cannot read"));
}

#[test]
fn cli_reports_syntax_errors_with_diagnostics() {
    let file = "tests/bad_program.gcl";
    fs::write(file, "if true -> skip" /* missing fi */).unwrap();

    let mut cmd = Command::cargo_bin("gcl").unwrap();
    cmd.arg(file);
    cmd.assert()
        .failure()
        .stderr(contains("gcl::syntax").or(contains("syntax error")));

    let _ = fs::remove_file(file);
}
