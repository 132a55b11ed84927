//! Loader messages as `tracing` events.
//!
//! Style markup is stripped so the text reads cleanly in log files and
//! structured subscribers.

use lmconfig_application::{LogLevel, LoaderLog};
use lmconfig_domain::strip_markup;
use tracing::{error, info, warn};

/// Target of every event emitted by [`TracingLoaderLog`].
pub const LOADER_TARGET: &str = "file_loader";

/// Forwards loader messages to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLoaderLog;

impl TracingLoaderLog {
    pub fn new() -> Self {
        Self
    }
}

impl LoaderLog for TracingLoaderLog {
    fn log(&self, level: LogLevel, message: &str) {
        let plain = strip_markup(message);
        match level {
            LogLevel::Info => info!(target: LOADER_TARGET, "{plain}"),
            LogLevel::Warn => warn!(target: LOADER_TARGET, "{plain}"),
            LogLevel::Error => error!(target: LOADER_TARGET, "{plain}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_without_subscriber_is_harmless() {
        let log = TracingLoaderLog::new();
        log.info("&fFile Loader: &7Loading file '&bsettings.yml&7'...");
        log.warn("&7plain");
        log.error("&4broken");
    }
}
