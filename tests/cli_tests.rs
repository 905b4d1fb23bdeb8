//! CLI surface tests for the `stackup` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stackup() -> Command {
    Command::cargo_bin("stackup").unwrap()
}

#[test]
fn test_help_lists_stack_command() {
    stackup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stack"))
        .stdout(predicate::str::contains("--path"));
}

#[test]
fn test_submit_help_shows_flags() {
    stackup()
        .args(["stack", "submit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--current"))
        .stdout(predicate::str::contains("--draft"))
        .stdout(predicate::str::contains("--remote"));
}

#[test]
fn test_submit_rejects_positional_arguments() {
    stackup()
        .args(["stack", "submit", "feat-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_submit_outside_repository_fails() {
    let dir = TempDir::new().unwrap();

    stackup()
        .args(["stack", "submit", "--path"])
        .arg(dir.path())
        .env("GIT_CEILING_DIRECTORIES", dir.path().parent().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("git error"));
}

#[test]
fn test_tree_outside_repository_fails() {
    let dir = TempDir::new().unwrap();

    stackup()
        .args(["stack", "tree", "--path"])
        .arg(dir.path())
        .env("GIT_CEILING_DIRECTORIES", dir.path().parent().unwrap())
        .assert()
        .failure();
}
