//! Integration tests for the innkeep CLI.
//!
//! These tests verify argument parsing, help text and version output.

mod common;

use common::TestEnv;
use predicates::prelude::*;

/// No subcommand prints usage and fails.
#[test]
fn test_cli_no_arguments() {
    let env = TestEnv::new();

    env.command_bare()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version_flag() {
    let env = TestEnv::new();

    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("innkeep"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_help_flag() {
    let env = TestEnv::new();

    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Manage hotel reservations"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_new_help_lists_form_fields() {
    let env = TestEnv::new();

    env.command_bare()
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--guest-name"))
        .stdout(predicate::str::contains("--guest-email"))
        .stdout(predicate::str::contains("--check-in"))
        .stdout(predicate::str::contains("--check-out"))
        .stdout(predicate::str::contains("--room"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let env = TestEnv::new();

    env.command_bare()
        .arg("check-out-everyone")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_unknown_backend_rejected() {
    let env = TestEnv::new();

    env.command()
        .args(["--backend", "postgres", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();

    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_innkeep()"))
        .stdout(predicate::str::contains("# To install").not())
        .stderr(predicate::str::contains(
            "innkeep completions bash > ~/.local/share/bash-completion/completions/innkeep",
        ));
}

#[test]
fn test_completions_without_install_hint() {
    let env = TestEnv::new();

    env.command_bare()
        .args(["completions", "elvish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("innkeep"))
        .stderr(predicate::str::is_empty());
}
