//! Tests that run the compiled `explorer` binary.

mod common;

use common::*;
use std::process::Output;
use tokio::process::Command;

const BINARY: &str = env!("CARGO_BIN_EXE_explorer");

async fn run_explorer(args: &[&str], base_url: Option<&str>) -> Output {
    let mut command = Command::new(BINARY);
    command
        .args(args)
        .env_remove("EXPLORER_API_URL")
        .env_remove("EXPLORER_FAILURE_POLICY")
        .env_remove("EXPLORER_CONNECT_TIMEOUT_SECS")
        .env("RUST_LOG", "off");
    if let Some(url) = base_url {
        command.env("EXPLORER_API_URL", url);
    }
    command.output().await.expect("Failed to execute binary")
}

#[tokio::test]
async fn test_version_flag() {
    let output = run_explorer(&["--version"], None).await;
    assert!(output.status.success(), "Version flag should exit with code 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim().strip_prefix("explorer ").unwrap_or("");
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_help_flag() {
    let output = run_explorer(&["--help"], None).await;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("distill <rp|narration|time>"));
}

#[tokio::test]
async fn test_invalid_arguments_exit_with_usage() {
    let output = run_explorer(&["distill", "nope", "x"], None).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: explorer"));
}

#[tokio::test]
async fn test_missing_base_url_fails() {
    let output = run_explorer(&["index"], None).await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("EXPLORER_API_URL"));
}

#[tokio::test]
async fn test_events_printed_as_ndjson() {
    let server = DatasetServer::start().await;
    server
        .mount_ndjson("/events/i1", &[MESSAGE, BUTTON, COMBAT_STATE])
        .await;

    let output = run_explorer(&["events", "i1"], Some(&server.uri())).await;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["message_id"], 9223372036854775807u64);
    assert_eq!(lines[2]["event_type"], "combat_state_update");
}

#[tokio::test]
async fn test_limit_flag() {
    let server = DatasetServer::start().await;
    server
        .mount_ndjson("/events/i1", &[MESSAGE, BUTTON, COMBAT_STATE])
        .await;

    let output = run_explorer(&["events", "i1", "--limit", "2"], Some(&server.uri())).await;
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 2);
}

#[tokio::test]
async fn test_server_failure_exits_non_zero() {
    let server = DatasetServer::start().await;
    server.mount("/distill/narration/i1", 500, "").await;

    let output = run_explorer(&["distill", "narration", "i1"], Some(&server.uri())).await;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
