use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

fn tasklist(file: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tasklist"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("TASKLIST_FILE");
    cmd.env_remove("TASKLIST_LOG");
    cmd.arg("--file").arg(file);
    cmd
}

/// Three tasks: 1 low/pending, 2 high/done, 3 medium/pending.
fn fixture() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tasks.json");
    fs::write(
        &file,
        r#"[
  {"id": 1, "description": "Buy milk", "priority": "low", "status": "pending", "created_at": "2024-01-01T00:00:00+00:00"},
  {"id": 2, "description": "Write tests", "priority": "high", "status": "done", "created_at": "2024-01-02T00:00:00+00:00"},
  {"id": 3, "description": "Deploy app", "priority": "medium", "status": "pending", "created_at": "2024-01-03T00:00:00+00:00"}
]"#,
    )
    .unwrap();
    (dir, file)
}

fn read_tasks(file: &Path) -> Vec<Value> {
    let raw = fs::read_to_string(file).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    value.as_array().expect("task file is an array").clone()
}

#[test]
fn add_assigns_sequential_ids_and_persists() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tasks.json");

    tasklist(&file)
        .args(["add", "Hello world"])
        .assert()
        .success()
        .stdout("Task #1 added: Hello world [medium]\n");
    tasklist(&file)
        .args(["add", "Urgent thing", "--priority", "high"])
        .assert()
        .success()
        .stdout("Task #2 added: Urgent thing [high]\n");
    tasklist(&file)
        .args(["add", "Later", "-p", "low"])
        .assert()
        .success();

    let tasks = read_tasks(&file);
    let ids: Vec<u64> = tasks.iter().map(|t| t["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(tasks[0]["status"], "pending");
    assert_eq!(tasks[1]["priority"], "high");
    assert!(tasks[2]["created_at"].is_string());
}

#[test]
fn add_continues_after_highest_id() {
    let (_dir, file) = fixture();
    tasklist(&file).args(["remove", "2"]).assert().success();
    tasklist(&file)
        .args(["add", "Another"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Task #4 added"));
}

#[test]
fn list_without_tasks_says_so() {
    let dir = tempdir().unwrap();
    tasklist(&dir.path().join("tasks.json"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn list_prints_table_in_store_order() {
    let (_dir, file) = fixture();
    tasklist(&file).arg("list").assert().success().stdout(
        "ID    Status     Priority   Description\n\
         --------------------------------------------------\n\
         1     [ ]        low        Buy milk\n\
         2     [x]        high       Write tests\n\
         3     [ ]        medium     Deploy app\n",
    );
}

#[test]
fn list_filters() {
    let (_dir, file) = fixture();
    tasklist(&file)
        .args(["list", "--status", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write tests").and(predicate::str::contains("Buy milk").not()));
    tasklist(&file)
        .args(["list", "--priority", "low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk").and(predicate::str::contains("Deploy app").not()));
    tasklist(&file)
        .args(["list", "--priority", "high", "--status", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks match the given filters."));
}

#[test]
fn done_marks_task_and_persists() {
    let (_dir, file) = fixture();
    tasklist(&file)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout("Task #1 marked as done.\n");
    assert_eq!(read_tasks(&file)[0]["status"], "done");
}

#[test]
fn done_unknown_id_fails_without_writing() {
    let (_dir, file) = fixture();
    let before = fs::read_to_string(&file).unwrap();
    tasklist(&file)
        .args(["done", "999"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("not found"));
    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn remove_drops_task() {
    let (_dir, file) = fixture();
    tasklist(&file)
        .args(["remove", "2"])
        .assert()
        .success()
        .stdout("Task #2 removed.\n");
    let tasks = read_tasks(&file);
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t["id"] != 2));
}

#[test]
fn remove_unknown_id_keeps_store() {
    let (_dir, file) = fixture();
    tasklist(&file)
        .args(["remove", "999"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
    assert_eq!(read_tasks(&file).len(), 3);
}

#[test]
fn stats_reports_counts_in_priority_order() {
    let (_dir, file) = fixture();
    tasklist(&file).arg("stats").assert().success().stdout(
        "Total tasks:   3\n\
         Pending:       2\n\
         Completed:     1\n\
         \n\
         By priority:\n\
         \x20 high       1\n\
         \x20 medium     1\n\
         \x20 low        1\n",
    );
}

#[test]
fn stats_on_empty_store() {
    let dir = tempdir().unwrap();
    tasklist(&dir.path().join("tasks.json"))
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total tasks:   0").and(predicate::str::contains("By priority").not()));
}

#[test]
fn corrupt_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tasks.json");
    fs::write(&file, "{not valid json").unwrap();

    tasklist(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."))
        .stderr("");
    tasklist(&file)
        .args(["add", "Fresh start"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Task #1 added"));
    assert_eq!(read_tasks(&file).len(), 1);
}

#[test]
fn version_exits_zero_and_never_touches_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tasks.json");
    for flag in ["--version", "-v"] {
        tasklist(&file)
            .arg(flag)
            .arg("add")
            .arg("ignored")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("tasklist "));
    }
    assert!(!file.exists());
    assert!(!dir.path().join("tasks.json.lock").exists());
}

#[test]
fn no_subcommand_prints_help() {
    let dir = tempdir().unwrap();
    tasklist(&dir.path().join("tasks.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn malformed_arguments_exit_with_usage() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tasks.json");
    for args in [
        vec!["add"],
        vec!["done", "abc"],
        vec!["add", "x", "--priority", "urgent"],
        vec!["list", "--status", "started"],
    ] {
        tasklist(&file)
            .args(&args)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("error:"));
    }
    assert!(!file.exists());
}

#[test]
fn file_comes_from_environment_when_flag_absent() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("env-tasks.json");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tasklist"));
    cmd.current_dir(dir.path())
        .env("TASKLIST_FILE", &file)
        .args(["add", "From env"])
        .assert()
        .success();

    assert_eq!(read_tasks(&file)[0]["description"], "From env");
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn json_format_outputs_machine_readable_results() {
    let (_dir, file) = fixture();

    let output = tasklist(&file)
        .args(["--format", "json", "list", "--status", "pending"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let listed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let output = tasklist(&file)
        .args(["--format", "json", "stats"])
        .output()
        .unwrap();
    let stats: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["done"], 1);
    assert_eq!(stats["by_priority"]["high"], 1);
}

#[test]
fn json_errors_use_envelope() {
    let (_dir, file) = fixture();
    let output = tasklist(&file)
        .args(["--format", "json", "done", "999"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let envelope: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(envelope["error"], "task_not_found");
    assert!(envelope["message"].as_str().unwrap().contains("999"));
}

#[test]
fn unwritable_target_is_fatal() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("missing-dir").join("tasks.json");
    tasklist(&file)
        .args(["add", "Nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn list_and_stats_accept_tasks_without_offset_timestamps() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tasks.json");
    fs::write(
        &file,
        r#"[
  {"id": 1, "description": "Test", "priority": "low", "status": "pending"},
  {"id": 2, "description": "Naive", "priority": "high", "status": "done", "created_at": "2026-01-01T00:00:00"}
]"#,
    )
    .unwrap();

    tasklist(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test").and(predicate::str::contains("Naive")));
    tasklist(&file)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total tasks:   2"));
}

#[test]
fn done_keeps_foreign_keys() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tasks.json");
    fs::write(
        &file,
        r#"[{"id": 1, "description": "Water plants", "priority": "low", "status": "pending", "tags": ["home"]}]"#,
    )
    .unwrap();

    tasklist(&file).args(["done", "1"]).assert().success();

    let tasks = read_tasks(&file);
    assert_eq!(tasks[0]["status"], "done");
    assert_eq!(tasks[0]["tags"], serde_json::json!(["home"]));
}

#[test]
fn add_at_id_ceiling_fails_cleanly() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tasks.json");
    let json = r#"[{"id": 18446744073709551615, "description": "Last", "priority": "low", "status": "pending"}]"#;
    fs::write(&file, json).unwrap();

    tasklist(&file)
        .args(["add", "One more"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no task id left"));
    assert_eq!(fs::read_to_string(&file).unwrap(), json);
}
