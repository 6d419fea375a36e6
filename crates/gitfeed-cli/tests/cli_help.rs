use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("gitfeed")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_watch_help_shows_overrides() {
    cargo_bin_cmd!("gitfeed")
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interval-secs"))
        .stdout(predicate::str::contains("base-url"))
        .stdout(predicate::str::contains("max-events"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("gitfeed")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("gitfeed")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
