// Library exports for testing and potential library use

pub mod cli;
pub mod collector;
pub mod logging;
pub mod presenter;

pub use cli::RuntimeOptions;
pub use collector::{CollectOptions, SessionCollection, collect_sessions};
pub use presenter::{OutputError, OutputMode};

use anyhow::{Context, Result};
use putty_sessions_store::{SESSIONS_KEY, SessionStore};
use std::io::Write;

/// Run one export: open the store, collect sessions, emit them to `out`.
pub fn run<W: Write>(options: &RuntimeOptions, out: &mut W) -> Result<()> {
    let store = open_store(options)?;
    let sessions = collect_sessions(
        store.as_ref(),
        SESSIONS_KEY,
        CollectOptions {
            skip_missing_host: options.skip_missing_host,
        },
    )
    .context("Failed to read PuTTY sessions")?;
    log::debug!("collected {} session(s)", sessions.len());

    presenter::present(&sessions, &output_mode(options), out)?;
    Ok(())
}

/// Select the output mode. `--filename` only applies to JSON output.
pub fn output_mode(options: &RuntimeOptions) -> OutputMode {
    if options.json {
        OutputMode::Json {
            filename: options.filename.clone(),
        }
    } else {
        if let Some(filename) = &options.filename {
            log::warn!(
                "--filename '{}' ignored without --json",
                filename.display()
            );
        }
        OutputMode::Table
    }
}

fn open_store(options: &RuntimeOptions) -> Result<Box<dyn SessionStore>> {
    match &options.reg_file {
        Some(path) => {
            log::debug!("reading sessions from export file '{}'", path.display());
            let store = putty_sessions_store::parse_reg_file(path)?;
            Ok(Box::new(store))
        }
        None => live_store(),
    }
}

#[cfg(windows)]
fn live_store() -> Result<Box<dyn SessionStore>> {
    Ok(Box::new(putty_sessions_store::RegistryStore::current_user()))
}

#[cfg(not(windows))]
fn live_store() -> Result<Box<dyn SessionStore>> {
    anyhow::bail!("the Windows registry is only available on Windows; use --reg-file")
}
