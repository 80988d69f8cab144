//! Parser for regedit export files (`regedit /e file.reg <key>`).
//!
//! Loads `HKEY_CURRENT_USER` keys and their values into a [`MemoryStore`] so
//! sessions exported on a Windows machine can be read anywhere. Keys from
//! other hives are skipped.

use super::error::StoreError;
use super::memory::{FieldValue, MemoryStore};
use std::path::Path;

const HEADER_V4: &str = "REGEDIT4";
const HEADER_V5: &str = "Windows Registry Editor Version 5.00";

/// Read and parse an export file.
///
/// Handles UTF-16LE files (as written by regedit) as well as UTF-8.
pub fn parse_reg_file(path: &Path) -> Result<MemoryStore, StoreError> {
    let bytes = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let store = parse_reg_str(&decode_text(&bytes))?;
    log::debug!("loaded export file '{}'", path.display());
    Ok(store)
}

/// Parse export file contents.
pub fn parse_reg_str(content: &str) -> Result<MemoryStore, StoreError> {
    let mut store = MemoryStore::new();
    let mut lines = logical_lines(content).into_iter();

    match lines.next() {
        Some((_, header)) if header == HEADER_V4 || header == HEADER_V5 => {}
        Some((line, _)) => {
            return Err(StoreError::Parse {
                line,
                message: "missing regedit header".to_string(),
            });
        }
        None => {
            return Err(StoreError::Parse {
                line: 1,
                message: "empty file".to_string(),
            });
        }
    }

    let mut section = Section::None;

    for (line, text) in lines {
        if let Some(inner) = text.strip_prefix('[') {
            let inner = inner.strip_suffix(']').ok_or_else(|| StoreError::Parse {
                line,
                message: "unterminated key header".to_string(),
            })?;
            section = parse_section(inner, line)?;
            if let Section::Key(ref path) = section {
                store.namespace_mut(path);
            }
            continue;
        }

        let (name, value) = parse_value_line(&text, line)?;
        match section {
            Section::None => {
                return Err(StoreError::Parse {
                    line,
                    message: "value outside of any key".to_string(),
                });
            }
            Section::Skipped => {}
            Section::Key(ref path) => {
                let node = store.namespace_mut(path);
                match value {
                    Some(value) => node.set_field(&name, value),
                    None => node.remove_field(&name),
                }
            }
        }
    }

    Ok(store)
}

enum Section {
    None,
    Skipped,
    Key(String),
}

fn parse_section(inner: &str, line: usize) -> Result<Section, StoreError> {
    if inner.starts_with('-') {
        return Err(StoreError::Parse {
            line,
            message: "key deletion entries are not supported".to_string(),
        });
    }

    let (hive, rest) = inner.split_once('\\').unwrap_or((inner, ""));
    if hive.eq_ignore_ascii_case("HKEY_CURRENT_USER") || hive.eq_ignore_ascii_case("HKCU") {
        Ok(Section::Key(rest.to_string()))
    } else {
        log::debug!("skipping key outside HKEY_CURRENT_USER: {inner}");
        Ok(Section::Skipped)
    }
}

/// Parse `"name"=value` or `@=value`. A `None` value means "delete".
fn parse_value_line(text: &str, line: usize) -> Result<(String, Option<FieldValue>), StoreError> {
    let err = |message: &str| StoreError::Parse {
        line,
        message: message.to_string(),
    };

    let (name, rest) = if let Some(rest) = text.strip_prefix('@') {
        (String::new(), rest)
    } else if text.starts_with('"') {
        parse_quoted(text).ok_or_else(|| err("unterminated value name"))?
    } else {
        return Err(err("expected a quoted value name"));
    };

    let data = rest
        .trim_start()
        .strip_prefix('=')
        .ok_or_else(|| err("expected '=' after value name"))?
        .trim();

    let value = if data == "-" {
        None
    } else if data.starts_with('"') {
        let (value, trailing) = parse_quoted(data).ok_or_else(|| err("unterminated string"))?;
        if !trailing.trim().is_empty() {
            return Err(err("unexpected text after string value"));
        }
        Some(FieldValue::String(value))
    } else if let Some((kind, _)) = data.split_once(':') {
        let kind = kind.trim().to_ascii_lowercase();
        if kind == "dword" || kind == "qword" || kind.starts_with("hex") {
            Some(FieldValue::Other(kind))
        } else {
            return Err(err("unknown value type"));
        }
    } else {
        return Err(err("unknown value type"));
    };

    Ok((name, value))
}

/// Parse a leading `"..."` with `\\` and `\"` escapes; returns the value and
/// the remaining text.
fn parse_quoted(text: &str) -> Option<(String, &str)> {
    let body = text.strip_prefix('"')?;
    let mut out = String::new();
    let mut chars = body.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Some((out, &body[idx + 1..])),
            '\\' => match chars.next() {
                Some((_, escaped @ ('\\' | '"'))) => out.push(escaped),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return None,
            },
            _ => out.push(ch),
        }
    }
    None
}

/// Trimmed, non-empty, non-comment lines with `\` continuations joined, each
/// paired with the 1-based number of the line it started on.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let text = raw.trim();
        let (start, mut joined) = match pending.take() {
            Some((start, acc)) => (start, acc),
            None => {
                if text.is_empty() || text.starts_with(';') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        if let Some(head) = text.strip_suffix('\\') {
            joined.push_str(head);
            pending = Some((start, joined));
        } else {
            joined.push_str(text);
            out.push((start, joined));
        }
    }

    if let Some(last) = pending {
        out.push(last);
    }
    out
}

fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        let rest = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        String::from_utf8_lossy(rest).into_owned()
    }
}
