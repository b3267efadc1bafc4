//! File logging.
//!
//! The TUI owns the terminal, so log output goes to rotating files under
//! `<data-dir>/logs/` and never to stderr. Initialization is idempotent for
//! the same directory and refuses to switch to a different one.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;

/// Environment variable overriding the configured level
pub const LOG_LEVEL_ENV: &str = "TACK_LOG";

const LOG_FILE_BASENAME: &str = "tack";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    handle: LoggerHandle,
}

/// Map a user-supplied level onto the names flexi_logger accepts.
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => Ok("off"),
        "error" => Ok("error"),
        "warn" | "warning" => Ok("warn"),
        "info" => Ok("info"),
        "debug" => Ok("debug"),
        "trace" => Ok("trace"),
        other => Err(format!("unsupported log level `{}`", other)),
    }
}

/// Directory logs are written to for a given data directory
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Start file logging at `level` into `log_dir`.
///
/// `$TACK_LOG`, when set, takes precedence over `level`.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let requested = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| level.to_string());
    let level = normalize_level(&requested)?;

    if let Some(state) = LOGGING.get() {
        if state.log_dir != log_dir {
            return Err(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                state.log_dir.display(),
                log_dir.display()
            ));
        }
        return Ok(());
    }

    std::fs::create_dir_all(log_dir).map_err(|e| {
        format!(
            "failed to create log directory `{}`: {}",
            log_dir.display(),
            e
        )
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|e| format!("invalid log level `{}`: {}", level, e))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .duplicate_to_stderr(Duplicate::None)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| format!("failed to start logger: {}", e))?;

    let state = LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        handle,
    };
    if LOGGING.set(state).is_err() {
        // Lost a race with another initializer; theirs is active.
        return Ok(());
    }

    info!(
        "event=app_start version={} level={} platform={}",
        env!("CARGO_PKG_VERSION"),
        level,
        std::env::consts::OS
    );
    Ok(())
}

/// Active `(level, dir)`, or `None` before [`init_logging`].
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// Flush buffered log lines. Call before the process exits.
pub fn flush_logs() {
    if let Some(state) = LOGGING.get() {
        state.handle.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_known_levels() {
        assert_eq!(normalize_level("INFO"), Ok("info"));
        assert_eq!(normalize_level(" warning "), Ok("warn"));
        assert_eq!(normalize_level("none"), Ok("off"));
        assert!(normalize_level("loud").is_err());
    }

    #[test]
    fn log_dir_is_under_data_dir() {
        assert_eq!(
            log_dir(Path::new("/data/tack")),
            PathBuf::from("/data/tack/logs")
        );
    }
}
