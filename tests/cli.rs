use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("covid-viz").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("covid-viz"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn cli_rejects_unknown_cases_type() {
    let mut cmd = Command::cargo_bin("covid-viz").unwrap();
    cmd.args(["map", "--plot", "x.svg", "--cases-type", "active"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown cases type"));
}

#[test]
fn cli_reports_unreachable_api() {
    // Port 9 (discard) on localhost is not an HTTP server.
    let mut cmd = Command::cargo_bin("covid-viz").unwrap();
    cmd.args(["--base-url", "http://127.0.0.1:9", "world"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GET http://127.0.0.1:9/all"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn table_online_top_five() {
    let mut cmd = Command::cargo_bin("covid-viz").unwrap();
    cmd.args(["table", "--limit", "5", "--locale", "de"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("   1  "));
}
