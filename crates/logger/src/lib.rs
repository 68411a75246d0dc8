//! Logging infrastructure for quillcraft.
//!
//! A process-wide logger writing timestamped lines to a file. Logging before
//! [`init`] is a no-op, so library crates can log unconditionally.

use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

#[derive(Debug)]
struct Logger {
    min_level: LogLevel,
    file_path: PathBuf,
}

impl Logger {
    fn new(file_path: PathBuf, min_level: LogLevel) -> Self {
        if let Some(parent) = file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        // Each session starts a fresh log
        if let Ok(mut file) = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
        {
            let _ = writeln!(
                file,
                "=== QuillCraft Log Start {} ===",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
        }

        Self {
            min_level,
            file_path,
        }
    }

    fn record(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();

        if let Ok(mut file) = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.file_path)
        {
            let _ = writeln!(file, "[{}] {}: {}", timestamp, level, message);
        }
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Initialize the global logger.
///
/// Truncates `file_path` and writes a session banner. Only the first call
/// has an effect.
pub fn init(file_path: PathBuf, min_level: LogLevel) {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, min_level)));
}

fn log(level: LogLevel, message: String) {
    let Some(logger) = LOGGER.get() else {
        return;
    };
    if let Ok(logger) = logger.lock() {
        logger.record(level, &message);
    }
}

pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message.into());
}

pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message.into());
}

pub fn warn(message: impl Into<String>) {
    log(LogLevel::Warn, message.into());
}

pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message.into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Info.to_string(), "INFO");
    }

    #[test]
    fn test_logger_filters_and_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("test.log");

        let logger = Logger::new(path.clone(), LogLevel::Info);
        logger.record(LogLevel::Debug, "hidden");
        logger.record(LogLevel::Info, "first");
        logger.record(LogLevel::Warn, "second");
        logger.record(LogLevel::Error, "third");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("=== QuillCraft Log Start"));
        assert!(!contents.contains("hidden"));
        assert!(contents.contains("INFO: first"));
        assert!(contents.contains("ERROR: third"));
    }

    #[test]
    fn test_global_logger_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("global.log");
        init(path.clone(), LogLevel::Debug);

        info("global message");
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO: global message"));
    }
}
