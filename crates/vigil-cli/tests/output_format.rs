//! Tests for output formats and record shapes.

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use vigil_test_support::{SyntheticFace, SyntheticFrame};

fn vigil() -> Command {
    let mut cmd = Command::cargo_bin("vigil").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

fn frame_dir() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    SyntheticFrame::vertical_bars(64, 64, 1)
        .image
        .save(&path)
        .unwrap();
    (dir, path)
}

fn trace_file(dir: &Path) -> PathBuf {
    let path = dir.join("trace.jsonl");
    let line = SyntheticFace::new().to_trace_line();
    std::fs::write(&path, line + "\n").unwrap();
    path
}

#[test]
fn test_jsonl_is_default() {
    let (_dir, path) = frame_dir();

    let output = vigil().arg("--quiet").arg(&path).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    // One record, one line, parseable on its own.
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert!(record.is_object());
}

#[test]
fn test_json_outputs_array() {
    let (_dir, path) = frame_dir();

    let output = vigil()
        .arg("--quiet")
        .arg("--format")
        .arg("json")
        .arg(&path)
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert!(value.is_array());
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[test]
fn test_json_pretty_is_multiline() {
    let (_dir, path) = frame_dir();

    let compact = vigil()
        .arg("--quiet")
        .arg("--format")
        .arg("json")
        .arg(&path)
        .output()
        .unwrap();
    let pretty = vigil()
        .arg("--quiet")
        .arg("--format")
        .arg("json")
        .arg("--pretty")
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(
        String::from_utf8_lossy(&compact.stdout).trim().lines().count(),
        1
    );
    assert!(String::from_utf8_lossy(&pretty.stdout).trim().lines().count() > 1);

    // Same content either way.
    let a: serde_json::Value = serde_json::from_slice(&compact.stdout).unwrap();
    let mut b: serde_json::Value = serde_json::from_slice(&pretty.stdout).unwrap();
    // Timestamps differ between the two runs.
    for record in b.as_array_mut().unwrap() {
        record["timestamp"] = a[0]["timestamp"].clone();
    }
    assert_eq!(a, b);
}

#[test]
fn test_detection_record_fields() {
    let (_dir, path) = frame_dir();

    let output = vigil().arg("--quiet").arg(&path).output().unwrap();
    let record: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();

    assert!(record["source"].as_str().unwrap().ends_with("frame.png"));
    assert_eq!(record["width"], 64);
    assert_eq!(record["height"], 64);
    assert!(record["edge_density"].is_number());
    assert!(record["detected"].is_boolean());
    assert!(record["score"].is_u64());
    // RFC 3339 timestamp
    assert!(record["timestamp"].as_str().unwrap().contains('T'));
}

#[test]
fn test_monitor_record_fields() {
    let dir = tempfile::tempdir().unwrap();
    let trace = trace_file(dir.path());

    let output = vigil()
        .arg("monitor")
        .arg("--quiet")
        .arg(&trace)
        .output()
        .unwrap();
    let record: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();

    assert_eq!(record["tick"], 0);
    assert_eq!(record["elapsed_ms"], 0);
    assert_eq!(record["face_detected"], true);
    assert_eq!(record["state"], "focused");
    assert!(record["eye_ratio"].is_number());
    assert!(record["yaw_deviation"].is_number());
    assert!(record.get("alert").is_none(), "absent alert is omitted");
}

#[test]
fn test_monitor_json_array_format() {
    let dir = tempfile::tempdir().unwrap();
    let trace = trace_file(dir.path());

    let output = vigil()
        .arg("monitor")
        .arg("--quiet")
        .arg("--format")
        .arg("json")
        .arg(&trace)
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.is_array());
}

#[test]
fn test_quiet_suppresses_stderr_noise() {
    let (_dir, path) = frame_dir();

    let output = vigil().arg("--quiet").arg(&path).output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("detected"),
        "quiet run must not narrate on stderr: {stderr}"
    );
}
