//! Logging bootstrap for the registrar process.
//!
//! # Responsibility
//! - Initialize either rolling file logs or stderr logs, once per process.
//! - Keep initialization idempotent and panic-free.
//!
//! # Invariants
//! - The first successful init wins; identical re-init is a no-op.
//! - Re-init with a different sink or level is rejected, never applied.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "kernelreg";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    sink: LogSink,
    _logger: LoggerHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LogSink {
    Stderr,
    File(PathBuf),
}

impl Display for LogSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => write!(f, "stderr"),
            Self::File(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Logging bootstrap error.
#[derive(Debug)]
pub enum LoggingError {
    /// Requested level is not one of trace|debug|info|warn|error.
    UnsupportedLevel(String),
    /// Log directory could not be created.
    CreateLogDir { path: PathBuf, source: std::io::Error },
    /// Logger backend refused to start.
    Backend(String),
    /// Logging is already active with a conflicting configuration.
    AlreadyInitialized { active: String, requested: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::CreateLogDir { path, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                path.display()
            ),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::AlreadyInitialized { active, requested } => write!(
                f,
                "logging already initialized as `{active}`; refusing to switch to `{requested}`"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateLogDir { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Initializes rolling file logging under `log_dir`.
///
/// # Invariants
/// - Repeat calls with the same level and directory are idempotent.
/// - Calls conflicting with the active configuration are rejected.
pub fn init_file_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    init(level, LogSink::File(log_dir.to_path_buf()))
}

/// Initializes stderr logging for ad-hoc runs with no log directory.
pub fn init_stderr_logging(level: &str) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    init(level, LogSink::Stderr)
}

/// Returns the default log level for the current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn init(level: &'static str, sink: LogSink) -> Result<(), LoggingError> {
    if let Some(state) = LOGGING_STATE.get() {
        return check_active(state, level, &sink);
    }

    let init_sink = sink.clone();
    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        let builder = Logger::try_with_str(level)
            .map_err(|err| LoggingError::Backend(err.to_string()))?;

        let builder = match &init_sink {
            LogSink::Stderr => builder.log_to_stderr(),
            LogSink::File(dir) => {
                std::fs::create_dir_all(dir).map_err(|err| LoggingError::CreateLogDir {
                    path: dir.clone(),
                    source: err,
                })?;
                builder
                    .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                    .rotate(
                        Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                        Naming::Numbers,
                        Cleanup::KeepLogFiles(MAX_LOG_FILES),
                    )
                    .append()
                    .format_for_files(flexi_logger::detailed_format)
            }
        };

        let logger = builder
            .write_mode(WriteMode::BufferAndFlush)
            .start()
            .map_err(|err| LoggingError::Backend(err.to_string()))?;

        info!(
            "event=logging_init module=logging status=ok level={} sink={} version={}",
            level,
            init_sink,
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            sink: init_sink,
            _logger: logger,
        })
    })?;

    check_active(state, level, &sink)
}

fn check_active(state: &LoggingState, level: &'static str, sink: &LogSink) -> Result<(), LoggingError> {
    if state.level == level && state.sink == *sink {
        return Ok(());
    }
    Err(LoggingError::AlreadyInitialized {
        active: format!("{} -> {}", state.level, state.sink),
        requested: format!("{} -> {}", level, sink),
    })
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, init_stderr_logging, normalize_level, LoggingError};

    #[test]
    fn normalize_level_accepts_known_values_case_insensitively() {
        assert_eq!(normalize_level("INFO").expect("INFO normalizes"), "info");
        assert_eq!(
            normalize_level(" warning ").expect("warning normalizes"),
            "warn"
        );
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        let err = normalize_level("verbose").expect_err("verbose is not a level");
        assert!(matches!(err, LoggingError::UnsupportedLevel(_)));
    }

    #[test]
    fn default_level_is_a_valid_level() {
        assert!(normalize_level(default_log_level()).is_ok());
    }

    #[test]
    fn stderr_init_is_idempotent_and_rejects_conflicting_level() {
        init_stderr_logging("info").expect("first init succeeds");
        init_stderr_logging("info").expect("same config is idempotent");

        let err = init_stderr_logging("debug").expect_err("conflicting level fails");
        assert!(matches!(err, LoggingError::AlreadyInitialized { .. }));
    }
}
