//! Integration tests for the `lb` CLI.
//!
//! Each test points `lb` at a database and config directory inside a temp
//! directory, runs it as a subprocess, and checks stdout and the exit status.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `lb` binary.
fn lb_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("lb");
    path
}

/// Run `lb` with the given args against `dir/logbook.db`, returning
/// (stdout, stderr, success).
fn run_lb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let db = dir.join("logbook.db");
    let output = Command::new(lb_bin())
        .arg("--db")
        .arg(&db)
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("LOGBOOK_DB")
        .env_remove("LOGBOOK_LOG")
        .output()
        .expect("failed to run lb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `lb` expecting success, return stdout.
fn run_lb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_lb(dir, args);
    if !success {
        panic!(
            "lb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Create the "Garden" project with one task and one log.
fn seed(dir: &Path) {
    run_lb_ok(
        dir,
        &[
            "create-project",
            "--name",
            "Garden",
            "--summary",
            "Vegetable beds",
            "--status",
            "in-progress",
        ],
    );
    run_lb_ok(dir, &["create-task", "--project", "1", "--title", "Dig"]);
    run_lb_ok(
        dir,
        &[
            "create-log",
            "--project",
            "1",
            "--title",
            "Day 1",
            "--desc",
            "# Notes\n- soil is wet",
        ],
    );
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_create_project_prints_id() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_lb_ok(tmp.path(), &["create-project", "--name", "Shed"]);
    assert_eq!(out.trim(), "Created project 1: Shed");
    assert!(tmp.path().join("logbook.db").exists());
}

#[test]
fn test_create_project_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_lb_ok(tmp.path(), &["create-project", "--name", "Shed", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["kind"], "project");
    assert_eq!(parsed["id"], 1);
}

#[test]
fn test_create_task_for_missing_project_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_lb(
        tmp.path(),
        &["create-task", "--project", "7", "--title", "Orphan"],
    );
    assert!(!success);
    assert_eq!(stderr.trim(), "error: project 7 not found");
}

#[test]
fn test_blank_name_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_lb(tmp.path(), &["create-project", "--name", "  "]);
    assert!(!success);
    assert_eq!(stderr.trim(), "error: name is required");
}

#[test]
fn test_unknown_status_is_a_usage_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_lb(
        tmp.path(),
        &["create-project", "--name", "Shed", "--status", "someday"],
    );
    assert!(!success);
    assert!(stderr.contains("someday"));
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_projects_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path());

    let out = run_lb_ok(tmp.path(), &["list-projects"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Project 1: Garden (In Progress)");
    assert_eq!(lines[1], "  Vegetable beds");
    assert_eq!(lines[2], "  [ ] 1 Dig");
    assert_eq!(lines[3], "  log 1 Day 1");
}

#[test]
fn test_list_projects_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    seed(tmp.path());

    let out = run_lb_ok(tmp.path(), &["list-projects", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["status"], "in_progress");
    assert_eq!(arr[0]["tasks"][0]["title"], "Dig");
    assert_eq!(arr[0]["tasks"][0]["completed"], false);
    assert_eq!(arr[0]["logs"][0]["description"], "# Notes\n- soil is wet");
}

#[test]
fn test_list_projects_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_lb_ok(tmp.path(), &["list-projects"]);
    assert_eq!(out.trim(), "No projects yet.");
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_database_path_from_config_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db = tmp.path().join("from-config.db");
    let config = tmp.path().join("lb.toml");
    fs::write(
        &config,
        format!("[database]\npath = {:?}\n", db.to_string_lossy()),
    )
    .unwrap();

    let output = Command::new(lb_bin())
        .args(["--config", config.to_str().unwrap()])
        .args(["create-project", "--name", "Shed"])
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env_remove("LOGBOOK_DB")
        .env_remove("LOGBOOK_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(db.exists());
}

#[test]
fn test_malformed_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = tmp.path().join("lb.toml");
    fs::write(&config, "[database\n").unwrap();

    let (_, stderr, success) = run_lb(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "list-projects"],
    );
    assert!(!success);
    assert!(stderr.starts_with("error: could not parse"));
}

#[test]
fn test_unwritable_log_file_warns_and_continues() {
    let tmp = tempfile::TempDir::new().unwrap();
    // A regular file where the log directory should be
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let config = tmp.path().join("lb.toml");
    fs::write(
        &config,
        format!(
            "[log]\nfile = {:?}\n",
            blocker.join("lb.log").to_string_lossy()
        ),
    )
    .unwrap();

    let (stdout, stderr, success) = run_lb(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "list-projects"],
    );
    assert!(success);
    assert!(stderr.starts_with("warning: logging disabled"));
    assert_eq!(stdout.trim(), "No projects yet.");
}
