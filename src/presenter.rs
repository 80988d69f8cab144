//! Rendering of the collected sessions as a table or a JSON document.

use crate::collector::SessionCollection;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How the collected sessions are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Right-aligned `name<TAB>host` rows on stdout.
    Table,
    /// Indented JSON, printed or appended to `filename`.
    Json { filename: Option<PathBuf> },
}

/// Errors produced while emitting output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not create json: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("could not open file: {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write data to file: {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not close file: {}: {source}", .path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write to standard output: {0}")]
    Stdout(#[source] io::Error),
}

/// Emit `sessions` in the given mode. Table and printed JSON go to `out`.
pub fn present<W: Write>(
    sessions: &SessionCollection,
    mode: &OutputMode,
    out: &mut W,
) -> Result<(), OutputError> {
    match mode {
        OutputMode::Table => print_table(sessions, out),
        OutputMode::Json { filename: None } => print_json(sessions, out),
        OutputMode::Json {
            filename: Some(path),
        } => append_json_file(sessions, path),
    }
}

/// Serialize with two-space indentation.
pub fn to_json(sessions: &SessionCollection) -> Result<String, OutputError> {
    serde_json::to_string_pretty(sessions).map_err(OutputError::Serialize)
}

/// Print the JSON document followed by a newline.
pub fn print_json<W: Write>(sessions: &SessionCollection, out: &mut W) -> Result<(), OutputError> {
    let data = to_json(sessions)?;
    writeln!(out, "{data}").map_err(OutputError::Stdout)?;
    out.flush().map_err(OutputError::Stdout)
}

/// Append the JSON document to `path`, creating the file if needed.
///
/// Existing content is never truncated and no trailing newline is written,
/// so repeated exports leave consecutive documents in the file.
pub fn append_json_file(sessions: &SessionCollection, path: &Path) -> Result<(), OutputError> {
    let data = to_json(sessions)?;

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o777);
    }

    let mut file = options.open(path).map_err(|source| OutputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(data.as_bytes())
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    file.sync_all().map_err(|source| OutputError::Close {
        path: path.to_path_buf(),
        source,
    })?;
    drop(file);

    log::info!("file '{}' written", path.display());
    Ok(())
}

/// Render the two-column table: names right-aligned, a tab, then the host.
pub fn render_table(sessions: &SessionCollection) -> String {
    let width = sessions
        .keys()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut table = String::new();
    for (name, host) in sessions {
        table.push_str(&format!("{name:>width$}\t{host}\n"));
    }
    table
}

pub fn print_table<W: Write>(sessions: &SessionCollection, out: &mut W) -> Result<(), OutputError> {
    out.write_all(render_table(sessions).as_bytes())
        .map_err(OutputError::Stdout)?;
    out.flush().map_err(OutputError::Stdout)
}
