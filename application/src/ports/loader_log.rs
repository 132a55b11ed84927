//! Port for operator-facing loader diagnostics.
//!
//! Messages carry inline style markup (`&b`, `&7`, `&r`, ...). Rendering is
//! up to the implementation: the console adapter colors them, the tracing
//! adapter strips them.
//!
//! This is separate from `tracing`-based debug logs, which record internal
//! details such as the keys a migration copied or dropped.

use lmconfig_domain::strip_markup;
use std::sync::Mutex;

/// Severity of a loader message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Sink for loader messages.
///
/// Logging must never fail the load, so methods return nothing.
pub trait LoaderLog: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Discards every message.
pub struct NoLoaderLog;

impl LoaderLog for NoLoaderLog {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// A captured loader message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps messages in memory, in order.
#[derive(Default)]
pub struct BufferedLoaderLog {
    records: Mutex<Vec<LogRecord>>,
}

impl BufferedLoaderLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured records.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Captured messages of one level, markup removed.
    pub fn plain_messages(&self, level: LogLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| strip_markup(&r.message))
            .collect()
    }

    /// Whether any message, markup removed, contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|r| strip_markup(&r.message).contains(needle))
    }
}

impl LoaderLog for BufferedLoaderLog {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_log_keeps_order_and_levels() {
        let log = BufferedLoaderLog::new();
        log.info("&fFirst");
        log.warn("&eSecond");
        log.error("&4Third");

        let records = log.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].level, LogLevel::Warn);
        assert_eq!(records[2].message, "&4Third");
        assert_eq!(log.plain_messages(LogLevel::Info), vec!["First".to_string()]);
        assert!(log.contains("Third"));
        assert!(!log.contains("&4"));
    }

    #[test]
    fn test_no_loader_log_is_silent() {
        NoLoaderLog.error("ignored");
    }
}
