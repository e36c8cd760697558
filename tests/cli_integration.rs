//! CLI Integration Tests
//!
//! End-to-end tests for CLI commands using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the higgs binary, run from an empty directory with no API key
fn higgs_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("higgs").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("HIGGS_SIMULATOR_INTERVAL_MS");
    cmd
}

#[test]
fn test_version_output() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("higgs"));
}

#[test]
fn test_help_shows_all_commands() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_serve_help() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--no-simulator"));
}

#[test]
fn test_simulate_json_is_seeded() {
    let dir = TempDir::new().unwrap();
    let run = |dir: &TempDir| {
        let output = higgs_cmd(dir)
            .args(["simulate", "--ticks", "5", "--seed", "1", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap()
    };

    let first = run(&dir);
    let second = run(&dir);

    assert_eq!(first["stats"]["total_requests"], 5);
    assert_eq!(first["logs"].as_array().unwrap().len(), 5);
    // Same seed, same ids and statuses
    assert_eq!(first["logs"][0]["id"], second["logs"][0]["id"]);
    assert_eq!(first["logs"][4]["status"], second["logs"][4]["status"]);
}

#[test]
fn test_simulate_table_output() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir)
        .args(["simulate", "-n", "3", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Requests"))
        .stdout(predicate::str::contains("Latency"));
}

#[test]
fn test_analyze_offline_prints_fallback() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir)
        .args(["analyze", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Failed to perform AI analysis due to service interruption.",
        ));
}

#[test]
fn test_analyze_event_file_json() {
    let dir = TempDir::new().unwrap();
    let event_path = dir.path().join("event.json");
    std::fs::write(
        &event_path,
        r#"{
            "id": "filed0001",
            "timestamp": "08:00:00",
            "method": "POST",
            "endpoint": "/data/handleMsg.do",
            "status": 500,
            "payload": {"userId": 1, "msgType": 2},
            "response": {"success": true},
            "latency_ms": 250
        }"#,
    )
    .unwrap();

    higgs_cmd(&dir)
        .args(["analyze", "--json", "--event"])
        .arg(&event_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("filed0001"))
        .stdout(predicate::str::contains("\"riskLevel\": \"Low\""));
}

#[test]
fn test_analyze_missing_event_file_fails() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir)
        .args(["analyze", "--event", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    let content = std::fs::read_to_string(dir.path().join("higgs.toml")).unwrap();
    assert!(content.contains("[simulator]"));
}

#[test]
fn test_config_init_no_overwrite() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("higgs.toml"), "existing").unwrap();

    higgs_cmd(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    higgs_cmd(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("higgs.toml")).unwrap();
    assert_ne!(content, "existing");
}

#[test]
fn test_invalid_command() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir).arg("backends").assert().failure();
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    higgs_cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("higgs"));
}
