//! Tests that drive the built `putty-sessions` binary.

mod common;

use common::write_export;
use std::process::Command;

fn putty_sessions() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_putty-sessions"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_table_output_on_stdout() {
    let (reg_file, _dir) = write_export(&[("my%20server", Some("10.0.0.5")), ("empty", Some(""))]);
    let output = putty_sessions()
        .arg("--reg-file")
        .arg(&reg_file)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "my server\t10.0.0.5\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Export PuTTY sessions"));
}

#[test]
fn test_json_file_written_twice() {
    let (reg_file, dir) = write_export(&[("web", Some("web.example.com"))]);
    let out_file = dir.path().join("out.txt");

    for _ in 0..2 {
        let output = putty_sessions()
            .arg("--reg-file")
            .arg(&reg_file)
            .args(["--json", "--filename"])
            .arg(&out_file)
            .output()
            .unwrap();
        assert!(output.status.success());
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("written"));
    }

    let content = std::fs::read_to_string(&out_file).unwrap();
    assert_eq!(content.matches("\"web\": \"web.example.com\"").count(), 2);
    assert!(content.contains("}{"));
}

#[test]
fn test_fatal_error_exits_non_zero() {
    let (reg_file, _dir) = write_export(&[("nohost", None)]);
    let output = putty_sessions()
        .arg("--reg-file")
        .arg(&reg_file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"));
    assert!(stderr.contains("HostName"));
}

#[test]
fn test_log_level_off_silences_stderr() {
    let (reg_file, _dir) = write_export(&[("web", Some("web.example.com"))]);
    let output = putty_sessions()
        .args(["--log-level", "off", "--reg-file"])
        .arg(&reg_file)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_usage_error() {
    let output = putty_sessions().arg("--bogus").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}
