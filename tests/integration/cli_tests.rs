//! End-to-end tests for the worker binary's command-line surface.

use std::io::Write;
use std::process::{Command, Stdio};

use super::test_helpers::target_file;

const BIN: &str = env!("CARGO_BIN_EXE_evolve-clang-format");

#[test]
fn missing_target_prints_usage_and_exits_one() {
    let output = Command::new(BIN).output().expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn closed_stdin_exits_cleanly_after_announcements() {
    let file = target_file("int x;\n");
    let mut child = Command::new(BIN)
        .arg(file.path())
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    drop(child.stdin.take());

    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"jipe.start\""));
    assert!(lines[1].contains("\"evolve.populate\""));
}

#[test]
fn malformed_input_exits_with_failure() {
    let file = target_file("int x;\n");
    let mut child = Command::new(BIN)
        .arg(file.path())
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    {
        let mut stdin = child.stdin.take().expect("stdin");
        stdin.write_all(b"{oops\n").expect("write");
    }

    let output = child.wait_with_output().expect("wait");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn template_request_round_trips_through_stdio() {
    let file = target_file("int x;\n");
    let mut child = Command::new(BIN)
        .arg(file.path())
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    {
        let mut stdin = child.stdin.take().expect("stdin");
        stdin
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":42,\"method\":\"evolve.template\"}\n")
            .expect("write");
    }

    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8");
    let response: serde_json::Value =
        serde_json::from_str(stdout.lines().nth(2).expect("response line")).expect("json");
    assert_eq!(response["id"], 42);
    assert_eq!(response["result"]["template"]["type"], "object");
}
