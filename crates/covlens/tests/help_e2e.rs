//! Smoke tests for the command surface.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn help_lists_every_command() {
    let assert = cargo_bin_cmd!("covlens").arg("--help").assert().success();
    assert
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("gate"))
        .stdout(predicate::str::contains("trend"))
        .stdout(predicate::str::contains("annotate"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn version_matches_the_package() {
    cargo_bin_cmd!("covlens")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_locale_is_rejected() {
    cargo_bin_cmd!("covlens")
        .args(["stats", "--tree", "t.json", "--locale", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'xx'"));
}
