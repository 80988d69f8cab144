//! Shared integration test helpers for putty-sessions.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` suppresses warnings when only some helpers are used.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a regedit export holding the given `(encoded name, host)` sessions.
///
/// A `None` host leaves the `HostName` value out entirely.
pub fn sessions_export(sessions: &[(&str, Option<&str>)]) -> String {
    let mut content = String::from("Windows Registry Editor Version 5.00\n\n");
    content.push_str("[HKEY_CURRENT_USER\\Software\\SimonTatham\\PuTTY\\Sessions]\n\n");
    for (name, host) in sessions {
        let _ = writeln!(
            content,
            "[HKEY_CURRENT_USER\\Software\\SimonTatham\\PuTTY\\Sessions\\{name}]"
        );
        content.push_str("\"Protocol\"=\"ssh\"\n");
        if let Some(host) = host {
            let _ = writeln!(content, "\"HostName\"=\"{host}\"");
        }
        content.push_str("\"PortNumber\"=dword:00000016\n\n");
    }
    content
}

/// Write an export into a fresh temp dir. Keep the `TempDir` alive for the
/// duration of the test.
pub fn write_export(sessions: &[(&str, Option<&str>)]) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("putty-sessions.reg");
    std::fs::write(&path, sessions_export(sessions)).expect("Failed to write export");
    (path, temp_dir)
}
