//! Command-line interface for putty-sessions.

use clap::Parser;
use std::path::PathBuf;

/// putty-sessions - Export PuTTY saved sessions as a table or JSON
#[derive(Parser, Debug)]
#[command(name = "putty-sessions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Append the JSON export to this file instead of printing it (requires --json)
    #[arg(short, long, value_name = "PATH")]
    pub filename: Option<PathBuf>,

    /// Write JSON export
    #[arg(short, long)]
    pub json: bool,

    /// Read sessions from a regedit export instead of the live registry
    #[arg(long, value_name = "PATH")]
    pub reg_file: Option<PathBuf>,

    /// Skip sessions without a HostName value instead of failing
    #[arg(long)]
    pub skip_missing_host: bool,

    /// Set log level (overrides RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the exporter
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Output file for JSON mode
    pub filename: Option<PathBuf>,
    /// Emit JSON instead of a table
    pub json: bool,
    /// Export file to read instead of the registry
    pub reg_file: Option<PathBuf>,
    /// Treat a missing HostName as empty
    pub skip_missing_host: bool,
    /// Log level from the command line, if given
    pub log_level: Option<log::LevelFilter>,
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        RuntimeOptions {
            filename: cli.filename,
            json: cli.json,
            reg_file: cli.reg_file,
            skip_missing_host: cli.skip_missing_host,
            log_level: cli.log_level.map(LogLevelArg::to_level_filter),
        }
    }
}

/// Parse the process arguments. Exits on `--help`, `--version` or usage errors.
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}
