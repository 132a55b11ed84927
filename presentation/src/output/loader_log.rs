//! Loader messages written to the terminal

use super::console::ConsoleFormatter;
use colored::Colorize;
use lmconfig_application::{LogLevel, LoaderLog};

/// Writes loader messages to stderr with their style markup rendered.
///
/// Multi-line messages keep the level tag on the first line only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLoaderLog;

impl ConsoleLoaderLog {
    pub fn new() -> Self {
        Self
    }

    fn level_tag(level: LogLevel) -> String {
        match level {
            LogLevel::Info => "[INFO]".blue().to_string(),
            LogLevel::Warn => "[WARN]".yellow().bold().to_string(),
            LogLevel::Error => "[ERROR]".red().bold().to_string(),
        }
    }

    /// The line written for a message, without the trailing newline.
    pub fn format_line(level: LogLevel, message: &str) -> String {
        format!(
            "{} {}",
            Self::level_tag(level),
            ConsoleFormatter::render_markup(message)
        )
    }
}

impl LoaderLog for ConsoleLoaderLog {
    fn log(&self, level: LogLevel, message: &str) {
        eprintln!("{}", Self::format_line(level, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_tags_level() {
        let line = ConsoleLoaderLog::format_line(LogLevel::Warn, "&7outdated &bmessages.yml");
        assert!(line.contains("[WARN]"));
        assert!(line.contains("messages.yml"));
        assert!(!line.contains("&7"));
    }
}
