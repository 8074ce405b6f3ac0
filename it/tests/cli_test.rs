//! End-to-end tests for the `it` binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Config pointing the database into `dir`
fn write_config(dir: &Path, average_story_points: u32) -> PathBuf {
    let config_path = dir.join("config.yml");
    let yaml = format!(
        "planning:\n  average-story-points: {}\nstorage:\n  db-path: {}\noutput:\n  date-format: \"%Y-%m-%d\"\n",
        average_story_points,
        dir.join("it.db").display()
    );
    fs::write(&config_path, yaml).expect("Failed to write config");
    config_path
}

fn it_cmd(dir: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("it").expect("binary should build");
    cmd.env("XDG_DATA_HOME", dir.join("data"))
        .env("NO_COLOR", "1")
        .env("HOME", dir)
        .env_remove("ISSUETRACKER_AVERAGE_STORY_POINTS")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn test_developer_lifecycle() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), 10);

    it_cmd(temp.path(), &config)
        .args(["developer", "create", "Ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created developer").and(predicate::str::contains("Ada")));

    it_cmd(temp.path(), &config)
        .args(["developer", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1"));

    it_cmd(temp.path(), &config)
        .args(["developer", "delete", "1"])
        .assert()
        .success();

    it_cmd(temp.path(), &config)
        .args(["developer", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No developers"));
}

#[test]
fn test_plan_json_output() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), 5);

    it_cmd(temp.path(), &config)
        .args(["developer", "create", "Ada"])
        .assert()
        .success();

    for (title, points) in [("Login", "3"), ("Signup", "3"), ("Logout", "1")] {
        it_cmd(temp.path(), &config)
            .args(["story", "create", title, "--points", points])
            .assert()
            .success();
    }

    it_cmd(temp.path(), &config)
        .args(["plan", "--format", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"week\": 1")
                .and(predicate::str::contains("\"week\": 2"))
                .and(predicate::str::contains("\"week\": 3").not())
                .and(predicate::str::contains("\"storyPoint\": 3"))
                .and(predicate::str::contains("\"type\": \"STORY\"")),
        );
}

#[test]
fn test_plan_without_developers() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), 10);

    it_cmd(temp.path(), &config)
        .args(["story", "create", "Login", "--points", "3"])
        .assert()
        .success();

    it_cmd(temp.path(), &config)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("No plan"));
}

#[test]
fn test_missing_story_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), 10);

    it_cmd(temp.path(), &config)
        .args(["story", "get", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Story not found: 99"));
}

#[test]
fn test_zero_points_rejected() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), 10);

    it_cmd(temp.path(), &config)
        .args(["story", "create", "Empty", "--points", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_bug_create_and_assign() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), 10);

    it_cmd(temp.path(), &config)
        .args(["developer", "create", "Grace"])
        .assert()
        .success();

    it_cmd(temp.path(), &config)
        .args(["bug", "create", "Crash on save", "--priority", "critical"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CRITICAL"));

    it_cmd(temp.path(), &config)
        .args(["bug", "assign", "1", "1"])
        .assert()
        .success();

    it_cmd(temp.path(), &config)
        .args(["bug", "get", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grace"));
}

#[test]
fn test_invalid_date_format_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.yml");
    let yaml = format!(
        "storage:\n  db-path: {}\noutput:\n  date-format: \"%Q\"\n",
        temp.path().join("it.db").display()
    );
    fs::write(&config, yaml).unwrap();

    it_cmd(temp.path(), &config)
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("date-format").and(predicate::str::contains("panicked").not()));
}
