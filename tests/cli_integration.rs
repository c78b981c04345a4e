//! Integration tests for the `wt` CLI.
//!
//! Each test points `wt` at a temp data directory with `-C`, runs it as a
//! subprocess, and verifies stdout and/or the stored record.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;

/// Get the path to the built `wt` binary.
fn wt_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("wt");
    path
}

fn wt_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(wt_bin());
    cmd.arg("-C").arg(dir).args(args).env_remove("WT_DATA_DIR");
    cmd
}

/// Run `wt` with the given args against `dir`, returning (stdout, stderr, success).
fn run_wt(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = wt_command(dir, args).output().expect("failed to run wt");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `wt` expecting success, return stdout.
fn run_wt_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_wt(dir, args);
    if !success {
        panic!(
            "wt {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `wt` with `input` piped to stdin.
fn run_wt_with_stdin(dir: &Path, args: &[&str], input: &str) -> String {
    let mut child = wt_command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run wt");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "wt {:?} failed", args);
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Add a todo and return its key.
fn add(dir: &Path, text: &str) -> String {
    let out = run_wt_ok(dir, &["add", text, "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    parsed["key"].as_str().unwrap().to_string()
}

fn stored_record(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(dir.join("_40toDos.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_empty_data_dir_lists_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_wt_ok(tmp.path(), &["list"]);
    assert_eq!(out, "Work (0/0 done)\n");
    assert_eq!(run_wt_ok(tmp.path(), &["context"]), "work\n");
}

#[test]
fn test_list_json_shape() {
    let tmp = tempfile::TempDir::new().unwrap();
    let key = add(tmp.path(), "Buy milk");

    let out = run_wt_ok(tmp.path(), &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["context"], "work");
    assert_eq!(
        parsed["todos"],
        serde_json::json!([{
            "key": key,
            "text": "Buy milk",
            "context": "work",
            "completed": false,
        }])
    );
}

#[test]
fn test_list_all_shows_both_contexts() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "Buy milk");
    run_wt_ok(tmp.path(), &["context", "travel"]);
    add(tmp.path(), "Lisbon");

    let out = run_wt_ok(tmp.path(), &["list", "--all"]);
    assert!(out.contains("Work (0/1 done)"));
    assert!(out.contains("Travel (0/1 done)"));
    assert!(out.contains("Buy milk"));
    assert!(out.contains("Lisbon"));

    let out = run_wt_ok(tmp.path(), &["list", "--context", "work"]);
    assert!(out.contains("Buy milk"));
    assert!(!out.contains("Lisbon"));
}

#[test]
fn test_list_rejects_context_with_all() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, _, success) = run_wt(tmp.path(), &["list", "--all", "--context", "work"]);
    assert!(!success);
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_buy_milk_scenario() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "Buy milk");

    run_wt_ok(tmp.path(), &["context", "travel"]);
    let out = run_wt_ok(tmp.path(), &["list"]);
    assert_eq!(out, "Travel (0/0 done)\n");

    run_wt_ok(tmp.path(), &["context", "work"]);
    let out = run_wt_ok(tmp.path(), &["list"]);
    assert!(out.starts_with("Work (0/1 done)\n"));
    assert!(out.contains("[ ] Buy milk"));
}

#[test]
fn test_single_record_on_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let key = add(tmp.path(), "Buy milk");
    run_wt_ok(tmp.path(), &["context", "travel"]);

    let record = stored_record(tmp.path());
    assert_eq!(record["version"], 1);
    assert_eq!(record["working"], false);
    assert_eq!(
        record["toDos"][key.as_str()],
        serde_json::json!({"text": "Buy milk", "working": true, "completed": false})
    );
}

#[test]
fn test_add_empty_text_fails_without_writing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_wt(tmp.path(), &["add", ""]);
    assert!(!success);
    assert!(stderr.contains("error: todo text is empty"));
    assert!(!tmp.path().join("_40toDos.json").exists());
}

#[test]
fn test_add_uses_current_context() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_wt_ok(tmp.path(), &["context", "t"]);
    let out = run_wt_ok(tmp.path(), &["add", "Where to next"]);
    assert!(out.starts_with("[ ] Where to next  TRAVEL  ("));
}

#[test]
fn test_toggle_twice_restores() {
    let tmp = tempfile::TempDir::new().unwrap();
    let key = add(tmp.path(), "Call mom");

    let out = run_wt_ok(tmp.path(), &["toggle", &key]);
    assert!(out.starts_with("[x] Call mom"));
    let out = run_wt_ok(tmp.path(), &["toggle", &key]);
    assert!(out.starts_with("[ ] Call mom"));
}

#[test]
fn test_toggle_missing_key_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_wt(tmp.path(), &["toggle", "12345"]);
    assert!(!success);
    assert!(stderr.contains("no todo with key 12345"));
}

#[test]
fn test_edit_keeps_context() {
    let tmp = tempfile::TempDir::new().unwrap();
    let key = add(tmp.path(), "Buy milk");
    run_wt_ok(tmp.path(), &["context", "travel"]);

    let out = run_wt_ok(tmp.path(), &["edit", &key, "Buy oat milk", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["text"], "Buy oat milk");
    assert_eq!(parsed["context"], "work");
}

#[test]
fn test_delete_with_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    let milk = add(tmp.path(), "Buy milk");
    let mom = add(tmp.path(), "Call mom");

    let out = run_wt_ok(tmp.path(), &["delete", &milk, "--yes"]);
    assert_eq!(out, "deleted \"Buy milk\"\n");

    let out = run_wt_ok(tmp.path(), &["list"]);
    assert!(!out.contains("Buy milk"));
    assert!(out.contains(&mom));
}

#[test]
fn test_delete_prompt_declined() {
    let tmp = tempfile::TempDir::new().unwrap();
    let key = add(tmp.path(), "Buy milk");

    let out = run_wt_with_stdin(tmp.path(), &["delete", &key], "n\n");
    assert_eq!(out, "Delete \"Buy milk\"? [y/N] kept\n");
    assert!(run_wt_ok(tmp.path(), &["list"]).contains("Buy milk"));
}

#[test]
fn test_delete_prompt_accepted() {
    let tmp = tempfile::TempDir::new().unwrap();
    let key = add(tmp.path(), "Buy milk");

    let out = run_wt_with_stdin(tmp.path(), &["delete", &key], "yes\n");
    assert!(out.ends_with("deleted \"Buy milk\"\n"));
    assert_eq!(run_wt_ok(tmp.path(), &["list"]), "Work (0/0 done)\n");
}

// ---------------------------------------------------------------------------
// Setup and recovery
// ---------------------------------------------------------------------------

#[test]
fn test_init_writes_config_once() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().join("wt");

    let out = run_wt_ok(&dir, &["init"]);
    assert!(out.starts_with("initialized"));
    assert!(dir.join("config.toml").exists());

    let (_, stderr, success) = run_wt(&dir, &["init"]);
    assert!(!success);
    assert!(stderr.contains("--force"));

    run_wt_ok(&dir, &["init", "--force"]);
}

#[test]
fn test_recovery_log_records_deletes() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(
        run_wt_ok(tmp.path(), &["recovery"]),
        "recovery log is empty\n"
    );

    let key = add(tmp.path(), "Buy milk");
    run_wt_ok(tmp.path(), &["delete", &key, "--yes"]);

    let out = run_wt_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("delete: todo deleted"));
    assert!(out.contains("Buy milk"));

    let out = run_wt_ok(tmp.path(), &["recovery", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}
