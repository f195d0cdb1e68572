//! File logger shared by every module.
//!
//! Lines are written as `<local RFC 3339 time> [LEVEL] message`. Debug builds
//! always log and echo to stderr; release builds write only when
//! `CAMPSITE_ENABLE_LOGGING=1`. Password values must never reach this module.

use crate::config::default_data_dir;
use crate::constants::{ENV_ENABLE_LOGGING, ENV_LOG_DIR, ENV_LOG_VERBOSE, MAX_LOG_BYTES};
use chrono::{Local, SecondsFormat};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

struct Logger {
    /// `None` when file logging is switched off
    file: Option<PathBuf>,
    verbose: bool,
}

impl Logger {
    fn from_env() -> Self {
        let enabled = cfg!(debug_assertions) || env_flag(ENV_ENABLE_LOGGING);
        let file = enabled.then(|| {
            let dir = std::env::var(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir().join("logs"));
            let _ = fs::create_dir_all(&dir);
            dir.join(if cfg!(debug_assertions) {
                "campsite-dev.log"
            } else {
                "campsite.log"
            })
        });

        Self {
            file,
            verbose: env_flag(ENV_LOG_VERBOSE),
        }
    }

    fn emit(&self, level: Level, message: &str) {
        let line = format_line(level, message);

        #[cfg(debug_assertions)]
        eprintln!("{}", line);

        if let Some(path) = &self.file {
            append_line(path, &line);
        }
    }
}

fn format_line(level: Level, message: &str) -> String {
    format!(
        "{} [{}] {}",
        Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
        level.as_str(),
        message
    )
}

/// Append to `path`, moving it to `*.log.bak` first once it exceeds the size cap.
fn append_line(path: &Path, line: &str) {
    let oversized = fs::metadata(path)
        .map(|meta| meta.len() > MAX_LOG_BYTES)
        .unwrap_or(false);
    if oversized {
        let backup = path.with_extension("log.bak");
        let _ = fs::remove_file(&backup);
        let _ = fs::rename(path, &backup);
    }

    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1").unwrap_or(false)
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

fn logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::from_env)
}

/// Read the logging environment and create the log directory now rather than
/// on the first message.
pub fn init_logger() {
    let _ = logger();
}

pub fn log_debug(message: &str) {
    logger().emit(Level::Debug, message);
}

/// Debug line that is only written with `CAMPSITE_LOG_VERBOSE=1`
pub fn log_debug_verbose(message: &str) {
    let logger = logger();
    if logger.verbose {
        logger.emit(Level::Debug, message);
    }
}

pub fn log_info(message: &str) {
    logger().emit(Level::Info, message);
}

pub fn log_warn(message: &str) {
    logger().emit(Level::Warn, message);
}

pub fn log_error(message: &str) {
    logger().emit(Level::Error, message);
}
