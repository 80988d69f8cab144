//! Logging backend for the `log` facade.
//!
//! Writes `<timestamp> <LEVEL> <message>` lines to stderr so stdout stays
//! reserved for the session table or JSON document.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG` (a plain level name
//! such as `debug`), then `info`.

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(&timestamp(), record.level(), record.args());
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger. Later calls are no-ops.
pub fn init(cli_level: Option<LevelFilter>) {
    let env_level = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, env_level.as_deref());
    let logger = LOGGER.get_or_init(|| StderrLogger { level });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}

/// Pick the effective level from the CLI flag and the `RUST_LOG` value.
pub fn resolve_level(cli_level: Option<LevelFilter>, env_level: Option<&str>) -> LevelFilter {
    cli_level
        .or_else(|| env_level.and_then(|v| LevelFilter::from_str(v.trim()).ok()))
        .unwrap_or(LevelFilter::Info)
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y/%m/%d %H:%M:%S").to_string()
}

fn format_line(timestamp: &str, level: log::Level, args: &std::fmt::Arguments) -> String {
    format!("{} {:<5} {}\n", timestamp, level, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_wins() {
        assert_eq!(
            resolve_level(Some(LevelFilter::Warn), Some("trace")),
            LevelFilter::Warn
        );
    }

    #[test]
    fn test_env_level_used_without_flag() {
        assert_eq!(resolve_level(None, Some("debug")), LevelFilter::Debug);
        assert_eq!(resolve_level(None, Some(" OFF ")), LevelFilter::Off);
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(resolve_level(None, None), LevelFilter::Info);
        assert_eq!(resolve_level(None, Some("module=debug")), LevelFilter::Info);
    }

    #[test]
    fn test_line_format() {
        let line = format_line(
            "2026/10/16 12:00:00",
            log::Level::Info,
            &format_args!("file '{}' written", "out.txt"),
        );
        assert_eq!(line, "2026/10/16 12:00:00 INFO  file 'out.txt' written\n");
    }
}
